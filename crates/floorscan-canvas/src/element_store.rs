//! Id-keyed storage for canvas elements.

use std::collections::BTreeMap;

use crate::model::{Element, ElementId, ElementKind};

/// Owns every element on the canvas, keyed by a generated [`ElementId`].
///
/// Ids come from a monotonically increasing counter that survives `clear()`,
/// so an id handed out once is never handed out again by the same store.
#[derive(Debug, Clone, Default)]
pub struct ElementStore {
    elements: BTreeMap<ElementId, Element>,
    next_id: u64,
}

impl ElementStore {
    pub fn new() -> Self {
        Self {
            elements: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Generates a fresh id without inserting anything.
    pub fn generate_id(&mut self) -> ElementId {
        // Default-constructed stores start at 0; skip it so ids stay non-zero.
        if self.next_id == 0 {
            self.next_id = 1;
        }
        let id = ElementId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Inserts an element under a newly generated id.
    pub fn add(&mut self, element: Element) -> ElementId {
        let id = self.generate_id();
        self.elements.insert(id, element);
        id
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(&id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    /// Removes an element. Missing ids return `None`.
    pub fn remove(&mut self, id: ElementId) -> Option<Element> {
        self.elements.remove(&id)
    }

    /// Drops every element. The id counter keeps running.
    pub fn clear(&mut self) {
        self.elements.clear();
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterates in id order, which is creation order.
    pub fn iter(&self) -> impl Iterator<Item = (ElementId, &Element)> {
        self.elements.iter().map(|(id, el)| (*id, el))
    }

    pub fn iter_kind(&self, kind: ElementKind) -> impl Iterator<Item = (ElementId, &Element)> {
        self.iter().filter(move |(_, el)| el.kind() == kind)
    }

    pub fn count_kind(&self, kind: ElementKind) -> usize {
        self.iter_kind(kind).count()
    }

    /// Elements in creation order, without ids.
    pub fn to_vec(&self) -> Vec<Element> {
        self.elements.values().cloned().collect()
    }
}
