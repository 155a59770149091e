//! # Selection & View-Preference Store
//!
//! Ephemeral per-view-instance state: the selected-item set, the view mode,
//! and the visible columns. Nothing here is persisted or synchronized to
//! the URL; the store dies with the view, which is intentional.
//!
//! Selection is an ordered set compared by `id`, never by reference: no two
//! entries share an id, and toggling the same item twice is a no-op
//! overall.

use reskit_common::ResourceItem;
use serde::{Deserialize, Serialize};

/// How a collection is rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
    Table,
}

/// Columns shown when no explicit set has been chosen
pub const DEFAULT_COLUMNS: &[&str] = &["id", "name", "description"];

/// Ephemeral UI state for one collection view instance
pub struct SelectionStore {
    selected: Vec<ResourceItem>,
    view_mode: ViewMode,
    visible_columns: Vec<String>,
}

impl Default for SelectionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionStore {
    pub fn new() -> Self {
        Self {
            selected: Vec::new(),
            view_mode: ViewMode::default(),
            visible_columns: DEFAULT_COLUMNS.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// Add the item if no entry shares its id, remove the existing entry
    /// otherwise.
    pub fn toggle(&mut self, item: ResourceItem) {
        if let Some(pos) = self.selected.iter().position(|s| s.id == item.id) {
            self.selected.remove(pos);
        } else {
            self.selected.push(item);
        }
    }

    /// Replace the selection with exactly `items`, deduplicated by id
    /// (first occurrence wins).
    pub fn select_all(&mut self, items: impl IntoIterator<Item = ResourceItem>) {
        self.selected.clear();
        for item in items {
            if !self.is_selected(&item.id) {
                self.selected.push(item);
            }
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn selected(&self) -> &[ResourceItem] {
        &self.selected
    }

    pub fn selected_ids(&self) -> Vec<&str> {
        self.selected.iter().map(|s| s.id.as_str()).collect()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.iter().any(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Drop a single id from the selection (e.g. after a delete succeeds)
    pub fn remove(&mut self, id: &str) {
        self.selected.retain(|s| s.id != id);
    }

    /// Drop selected ids that no longer appear in a freshly loaded list
    pub fn retain_existing(&mut self, items: &[ResourceItem]) {
        self.selected
            .retain(|s| items.iter().any(|i| i.id == s.id));
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    pub fn visible_columns(&self) -> &[String] {
        &self.visible_columns
    }

    /// Replace the visible columns, keeping first occurrences of duplicates
    pub fn set_visible_columns(&mut self, columns: Vec<String>) {
        let mut seen = Vec::with_capacity(columns.len());
        for column in columns {
            if !seen.contains(&column) {
                seen.push(column);
            }
        }
        self.visible_columns = seen;
    }
}
