use crate::element_store::ElementStore;
use crate::model::ElementId;

/// Tracks the single selected element.
///
/// The canvas has one selection at a time; there is no multi-select. The
/// manager only holds the id. Whether that id still resolves is checked
/// against the [`ElementStore`] on every read that needs the element.
#[derive(Debug, Clone, Default)]
pub struct SelectionManager {
    selected_id: Option<ElementId>,
}

impl SelectionManager {
    /// Creates a new `SelectionManager` with no selection.
    ///
    /// # Examples
    ///
    /// ```
    /// use floorscan_canvas::selection_manager::SelectionManager;
    ///
    /// let manager = SelectionManager::new();
    /// assert_eq!(manager.selected_id(), None);
    /// ```
    pub fn new() -> Self {
        Self { selected_id: None }
    }

    /// Returns the selected id, if any.
    pub fn selected_id(&self) -> Option<ElementId> {
        self.selected_id
    }

    /// Selects `id`. Returns `true` when the selection changed.
    pub fn select(&mut self, id: ElementId) -> bool {
        let changed = self.selected_id != Some(id);
        self.selected_id = Some(id);
        changed
    }

    /// Clears the selection. Returns `true` when something was selected.
    pub fn deselect(&mut self) -> bool {
        self.selected_id.take().is_some()
    }

    pub fn is_selected(&self, id: ElementId) -> bool {
        self.selected_id == Some(id)
    }

    /// Drops the selection if it refers to `id`.
    pub fn forget(&mut self, id: ElementId) {
        if self.selected_id == Some(id) {
            self.selected_id = None;
        }
    }

    /// Returns the selected id only if it still exists in `store`.
    pub fn resolve(&self, store: &ElementStore) -> Option<ElementId> {
        self.selected_id.filter(|id| store.contains(*id))
    }
}
