//! Content cache keyed by route path.
//!
//! Loaded pages are kept here rather than on the route descriptors, so
//! cache state can be inspected and invalidated independently of route
//! identity.

use std::collections::HashMap;
use std::sync::Arc;

use crate::page::PageContent;

/// Cache of loaded pages, one slot per route path.
#[derive(Debug, Clone, Default)]
pub struct ContentCache {
    pages: HashMap<String, Arc<PageContent>>,
}

impl ContentCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a loaded page for the given route path, replacing any previous
    /// entry.
    pub fn insert(&mut self, route_path: impl Into<String>, page: PageContent) {
        self.pages.insert(route_path.into(), Arc::new(page));
    }

    /// Page for a route, if loaded.
    pub fn get(&self, route_path: &str) -> Option<&Arc<PageContent>> {
        self.pages.get(route_path)
    }

    /// Whether a route has loaded content.
    pub fn contains(&self, route_path: &str) -> bool {
        self.pages.contains_key(route_path)
    }

    /// Drop a route's cached page.
    pub fn remove(&mut self, route_path: &str) -> Option<Arc<PageContent>> {
        self.pages.remove(route_path)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::test_page;

    #[test]
    fn stores_and_replaces_pages_by_route_path() {
        let mut cache = ContentCache::new();

        cache.insert("/x", test_page("x", &[]));
        cache.insert("/x", test_page("x", &["a"]));

        assert_eq!(cache.len(), 1);
        assert!(cache.get("/x").unwrap().is_sectioned());
    }

    #[test]
    fn removal_clears_the_slot() {
        let mut cache = ContentCache::new();
        cache.insert("/x", test_page("x", &[]));

        assert!(cache.remove("/x").is_some());
        assert!(!cache.contains("/x"));
        assert!(cache.is_empty());
    }
}
