//! Typed notification hooks.
//!
//! The canvas calls these synchronously, after its own state has been
//! updated, so a hook always observes the post-change element.

use std::fmt;

use floorscan_core::DataCallback;

use crate::model::{Element, ElementId};

/// An element and its state at the time of the notification.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementEvent {
    pub id: ElementId,
    pub element: Element,
}

#[derive(Default)]
pub struct CanvasHooks {
    /// Selection changed. `None` means the selection was cleared.
    pub on_select: Option<DataCallback<Option<ElementEvent>>>,
    pub on_move: Option<DataCallback<ElementEvent>>,
    pub on_rotate: Option<DataCallback<ElementEvent>>,
    /// Fired with the element as it was just before removal.
    pub on_delete: Option<DataCallback<ElementEvent>>,
    /// A reference line was completed; receives its length in image pixels.
    pub on_calibrate: Option<DataCallback<f64>>,
}

impl CanvasHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_on_select(&mut self, f: impl FnMut(Option<ElementEvent>) + 'static) {
        self.on_select = Some(Box::new(f));
    }

    pub fn set_on_move(&mut self, f: impl FnMut(ElementEvent) + 'static) {
        self.on_move = Some(Box::new(f));
    }

    pub fn set_on_rotate(&mut self, f: impl FnMut(ElementEvent) + 'static) {
        self.on_rotate = Some(Box::new(f));
    }

    pub fn set_on_delete(&mut self, f: impl FnMut(ElementEvent) + 'static) {
        self.on_delete = Some(Box::new(f));
    }

    pub fn set_on_calibrate(&mut self, f: impl FnMut(f64) + 'static) {
        self.on_calibrate = Some(Box::new(f));
    }

    pub(crate) fn selected(&mut self, event: Option<ElementEvent>) {
        if let Some(cb) = self.on_select.as_mut() {
            cb(event);
        }
    }

    pub(crate) fn moved(&mut self, event: ElementEvent) {
        if let Some(cb) = self.on_move.as_mut() {
            cb(event);
        }
    }

    pub(crate) fn rotated(&mut self, event: ElementEvent) {
        if let Some(cb) = self.on_rotate.as_mut() {
            cb(event);
        }
    }

    pub(crate) fn deleted(&mut self, event: ElementEvent) {
        if let Some(cb) = self.on_delete.as_mut() {
            cb(event);
        }
    }

    pub(crate) fn calibrated(&mut self, pixels: f64) {
        if let Some(cb) = self.on_calibrate.as_mut() {
            cb(pixels);
        }
    }
}

impl fmt::Debug for CanvasHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CanvasHooks")
            .field("on_select", &self.on_select.is_some())
            .field("on_move", &self.on_move.is_some())
            .field("on_rotate", &self.on_rotate.is_some())
            .field("on_delete", &self.on_delete.is_some())
            .field("on_calibrate", &self.on_calibrate.is_some())
            .finish()
    }
}
