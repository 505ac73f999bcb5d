//! Element operations: selection, move, rotate, delete.

use super::Canvas;
use crate::hooks::ElementEvent;
use crate::model::{Element, ElementId};

impl Canvas {
    /// Returns the selected element id, if it still exists.
    pub fn selected_id(&self) -> Option<ElementId> {
        self.selection.resolve(&self.store)
    }

    pub fn selected_element(&self) -> Option<&Element> {
        self.selected_id().and_then(|id| self.store.get(id))
    }

    /// Selects an element. Returns `false` for unknown ids.
    pub fn select(&mut self, id: ElementId) -> bool {
        let Some(element) = self.store.get(id) else {
            return false;
        };
        let event = ElementEvent {
            id,
            element: element.clone(),
        };
        if self.selection.select(id) {
            self.hooks.selected(Some(event));
            self.render();
        }
        true
    }

    /// Clears the selection. Returns `true` when something was selected.
    pub fn deselect(&mut self) -> bool {
        if self.selection.deselect() {
            self.hooks.selected(None);
            self.render();
            true
        } else {
            false
        }
    }

    /// Moves an element so its center lands on image point `(x, y)`.
    ///
    /// Walls translate rigidly. Returns `false` for unknown ids.
    pub fn move_element(&mut self, id: ElementId, x: f64, y: f64) -> bool {
        if !(x.is_finite() && y.is_finite()) {
            return false;
        }
        let Some(element) = self.store.get_mut(id) else {
            return false;
        };
        element.move_to(x, y);
        let event = ElementEvent {
            id,
            element: element.clone(),
        };
        self.hooks.moved(event);
        self.render();
        true
    }

    /// Rotates the selected element by the configured step, modulo 360.
    ///
    /// Returns the new rotation, or `None` when nothing is selected or the
    /// selection is a wall.
    pub fn rotate_selected(&mut self) -> Option<(ElementId, f64)> {
        let id = self.selected_id()?;
        let step = self.settings().rotation_step_deg;
        let element = self.store.get_mut(id)?;
        let rotation = element.rotate(step)?;
        let event = ElementEvent {
            id,
            element: element.clone(),
        };
        tracing::debug!("Rotated element {} to {}°", id, rotation);
        self.hooks.rotated(event);
        self.render();
        Some((id, rotation))
    }

    /// Deletes the selected element. Returns its id.
    pub fn delete_selected(&mut self) -> Option<ElementId> {
        let id = self.selected_id()?;
        self.delete_element(id).then_some(id)
    }

    /// Deletes an element by id. Unknown or already-deleted ids are a no-op
    /// returning `false`.
    pub fn delete_element(&mut self, id: ElementId) -> bool {
        let Some(element) = self.store.remove(id) else {
            return false;
        };
        if self.selection.is_selected(id) {
            self.selection.forget(id);
            self.hooks.selected(None);
        }
        if let super::Gesture::Dragging { id: dragged, .. } = self.gesture() {
            if dragged == id {
                self.end_gesture();
            }
        }
        tracing::debug!("Deleted element {}", id);
        self.hooks.deleted(ElementEvent { id, element });
        self.render();
        true
    }
}
