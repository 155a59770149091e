//! # List-Parameter Synchronizer
//!
//! Two-way mapping between a view's [`ListParams`] and the navigable
//! location. The synchronizer owns the canonical parameters; the location
//! is a derived encoding that is only authoritative on initial load.

use crate::navigation::Navigator;
use crate::params::{ListParams, ParamsPatch, SortOrder};
use std::sync::Arc;

/// Keeps one view's list parameters addressable and shareable via the URL.
///
/// Dedicated setters (`set_search`, `set_sort`, `set_filter`) reset the page
/// to 1; the generic [`write`](Self::write) does not.
pub struct ParamSync<N> {
    navigator: Arc<N>,
    path: String,
    defaults: ListParams,
}

impl<N: Navigator> ParamSync<N> {
    pub fn new(navigator: Arc<N>, path: impl Into<String>, defaults: ListParams) -> Self {
        Self {
            navigator,
            path: path.into(),
            defaults,
        }
    }

    pub fn defaults(&self) -> &ListParams {
        &self.defaults
    }

    /// Decode the current location's query string, merged over defaults.
    pub fn read(&self) -> ListParams {
        let location = self.navigator.location();
        ListParams::from_query_string(&location.query, &self.defaults)
    }

    /// Merge `patch` into the current parameters and push the canonical
    /// minimal query string. Returns the resulting parameters.
    pub fn write(&self, patch: &ParamsPatch) -> ListParams {
        let mut params = self.read();
        params.apply(patch);

        let query = params.to_query_string(&self.defaults);
        tracing::debug!(path = %self.path, query = %query, "params write");
        self.navigator.push(&self.path, &query);
        params
    }

    pub fn set_page(&self, page: u32) -> ListParams {
        self.write(&ParamsPatch::new().page(page))
    }

    /// Changing the search term always resets pagination.
    pub fn set_search(&self, term: impl Into<String>) -> ListParams {
        self.write(&ParamsPatch::new().search(term).page(1))
    }

    /// Changing the sort always resets pagination.
    pub fn set_sort(&self, key: impl Into<String>, order: SortOrder) -> ListParams {
        self.write(&ParamsPatch::new().sort(key, order).page(1))
    }

    /// Changing a filter always resets pagination.
    pub fn set_filter(&self, key: impl Into<String>, value: impl Into<String>) -> ListParams {
        self.write(&ParamsPatch::new().filter(key, value).page(1))
    }

    pub fn remove_filter(&self, key: impl Into<String>) -> ListParams {
        self.write(&ParamsPatch::new().remove_filter(key).page(1))
    }

    /// Navigate to the bare path with no query string at all.
    ///
    /// Distinct from writing empty values: the visible URL loses even the
    /// caller defaults, though defaults still apply on the next `read`.
    pub fn clear(&self) {
        self.navigator.push(&self.path, "");
    }

    /// The same minimal encoding used for navigation, for handing to the
    /// fetch layer so the displayed URL and the fetch key always match.
    pub fn to_query_string(&self) -> String {
        self.read().to_query_string(&self.defaults)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::MemoryNavigator;

    fn sync() -> ParamSync<MemoryNavigator> {
        ParamSync::new(
            Arc::new(MemoryNavigator::at_path("/items")),
            "/items",
            ListParams::default(),
        )
    }

    #[test]
    fn test_read_starts_at_defaults() {
        let sync = sync();
        assert_eq!(sync.read(), ListParams::default());
    }

    #[test]
    fn test_write_round_trip() {
        let sync = sync();
        let written = sync.write(&ParamsPatch::new().page(2).search("foo"));

        assert_eq!(sync.read(), written);
        assert_eq!(sync.to_query_string(), "page=2&search=foo");
    }

    #[test]
    fn test_search_resets_page() {
        let sync = sync();
        sync.set_page(5);
        assert_eq!(sync.read().page, 5);

        let params = sync.set_search("bar");
        assert_eq!(params.page, 1);
        assert_eq!(sync.to_query_string(), "search=bar");
    }

    #[test]
    fn test_sort_resets_page() {
        let sync = sync();
        sync.set_page(3);

        let params = sync.set_sort("date", SortOrder::Desc);
        assert_eq!(params.page, 1);
        assert_eq!(params.sort_by, "date");
        assert_eq!(params.sort_order, SortOrder::Desc);
    }

    #[test]
    fn test_filter_resets_page() {
        let sync = sync();
        sync.set_page(4);

        let params = sync.set_filter("status", "open");
        assert_eq!(params.page, 1);
        assert_eq!(params.filters.get("status").map(String::as_str), Some("open"));
    }

    #[test]
    fn test_clear_pushes_bare_path() {
        let navigator = Arc::new(MemoryNavigator::at_path("/items"));
        let sync = ParamSync::new(navigator.clone(), "/items", ListParams::default());

        sync.set_search("foo");
        sync.clear();

        assert_eq!(navigator.location().href(), "/items");
        // Defaults still apply after clearing
        assert_eq!(sync.read(), ListParams::default());
    }

    #[test]
    fn test_example_scenario() {
        // {page: 2, search: "foo"} on /items, then set_search("bar")
        let navigator = Arc::new(MemoryNavigator::at_path("/items"));
        let sync = ParamSync::new(navigator.clone(), "/items", ListParams::default());

        sync.write(&ParamsPatch::new().page(2).search("foo"));
        assert_eq!(navigator.location().href(), "/items?page=2&search=foo");

        sync.set_search("bar");
        assert_eq!(navigator.location().href(), "/items?search=bar");
    }

    #[test]
    fn test_rewrite_is_idempotent() {
        let navigator = Arc::new(MemoryNavigator::at_path("/items"));
        let sync = ParamSync::new(navigator.clone(), "/items", ListParams::default());

        sync.write(&ParamsPatch::new().page(2).filter("status", "open"));
        let first = navigator.location().href();

        sync.write(&ParamsPatch::new());
        assert_eq!(navigator.location().href(), first);
    }
}
