//! Type aliases for commonly used complex types.
//!
//! Complex types like `Rc<RefCell<Vec<Box<dyn FnMut(&T)>>>>` are hard to read.
//! The aliases here give the shared-state and callback shapes used by the
//! canvas hooks and the workflow controller one name each.

use parking_lot::Mutex;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

// =============================================================================
// SINGLE-THREADED SHARED TYPES (Rc<RefCell<T>>)
// =============================================================================

/// A reference-counted, interior-mutable wrapper for single-threaded sharing.
///
/// The canvas runs on the UI thread; hook closures that need to record what
/// they saw capture one of these.
pub type Shared<T> = Rc<RefCell<T>>;

/// Wraps `value` in a [`Shared`].
pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}

// =============================================================================
// THREAD-SAFE SHARED TYPES (Arc<Mutex<T>>)
// =============================================================================

/// A thread-safe, mutex-protected wrapper for cross-thread sharing.
///
/// Uses `parking_lot::Mutex`; the workflow's in-flight analysis registry is
/// held in one so tickets can release it from an async task.
pub type ThreadSafe<T> = Arc<Mutex<T>>;

/// Wraps `value` in a [`ThreadSafe`].
pub fn thread_safe<T>(value: T) -> ThreadSafe<T> {
    Arc::new(Mutex::new(value))
}

// =============================================================================
// CALLBACK TYPES
// =============================================================================

/// A callback that receives a single parameter.
pub type DataCallback<T> = Box<dyn FnMut(T)>;
