//! Navigation state machine.

use std::sync::Arc;

use crate::cache::ContentCache;
use crate::history::{History, HistoryEntry};
use crate::page::PageContent;
use crate::path::{decompose, NO_HASH};
use crate::route::{Route, RouteTable};

/// Errors returned from navigation.
#[derive(Debug, thiserror::Error)]
pub enum NavError {
    /// The target route identifier matched nothing in the table.
    #[error("Invalid route: {0}")]
    UnknownRoute(String),

    /// The route exists but has no loaded content to display.
    #[error("No content loaded for route: {0}")]
    ContentUnavailable(String),
}

/// Where the host should scroll after a navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrollTarget {
    /// Jump to a section container, instant.
    Container(String),

    /// Jump to a heading element directly, instant.
    Heading(String),

    /// Scroll to the document top; animated only for same-page jumps.
    Top { animated: bool },
}

/// Effects of a successful navigation, to be applied by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    /// Canonical path of the resolved route.
    pub route: String,

    /// Whether displayed content changed to a different route's page.
    pub swapped: bool,

    /// History entry pushed by this navigation, if any.
    pub pushed: Option<HistoryEntry>,

    /// Scroll command.
    pub scroll: ScrollTarget,
}

/// The navigation controller: validates targets, swaps the active route,
/// synchronizes history, and resolves scroll anchors.
#[derive(Debug)]
pub struct Router {
    base_path: String,
    table: RouteTable,
    cache: ContentCache,
    history: History,
    current: Option<String>,
}

impl Router {
    /// Create a router over a loaded table and cache.
    pub fn new(base_path: impl Into<String>, table: RouteTable, cache: ContentCache) -> Self {
        Self {
            base_path: base_path.into(),
            table,
            cache,
            history: History::new(),
            current: None,
        }
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// All routes currently in the table.
    pub fn routes(&self) -> &RouteTable {
        &self.table
    }

    pub fn cache(&self) -> &ContentCache {
        &self.cache
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// The active route, if any navigation has succeeded.
    pub fn current(&self) -> Option<&Route> {
        self.current.as_deref().and_then(|p| self.table.find(p))
    }

    /// Content of the active route.
    pub fn current_page(&self) -> Option<&Arc<PageContent>> {
        self.current.as_deref().and_then(|p| self.cache.get(p))
    }

    /// A route identifier is valid when it equals the base path or matches
    /// some route's canonical path.
    pub fn validate(&self, route_id: &str) -> bool {
        route_id == self.base_path || self.table.contains(route_id)
    }

    /// Navigate to `path`. `replay` marks history-driven navigations, which
    /// never push a new entry.
    pub fn navigate(&mut self, path: &str, replay: bool) -> Result<Navigation, NavError> {
        let parts = decompose(&self.base_path, path);

        if !self.validate(&parts.route) {
            return Err(NavError::UnknownRoute(parts.route));
        }

        // Valid-but-absent covers the base path special case.
        let target = self
            .table
            .find(&parts.route)
            .ok_or_else(|| NavError::ContentUnavailable(parts.route.clone()))?;
        let route_path = target.path.clone();

        let already_on = self.current.as_deref() == Some(route_path.as_str());

        let page = self.cache.get(&route_path).cloned();

        let swapped = if already_on {
            false
        } else {
            // A content swap requires a loaded page.
            if page.is_none() {
                return Err(NavError::ContentUnavailable(route_path));
            }
            self.current = Some(route_path.clone());
            true
        };

        let same_route = already_on
            && self
                .history
                .state()
                .is_some_and(|state| state.hash == parts.hash);

        let pushed = if !replay && !same_route {
            let route_part = if route_path == "/" { "" } else { route_path.as_str() };
            let entry = HistoryEntry {
                path: format!("{}{}", self.base_path, route_part),
                hash: parts.hash.clone(),
            };
            self.history.push(entry.clone());
            Some(entry)
        } else {
            None
        };

        let scroll = resolve_scroll(&parts.hash, page.as_deref(), already_on);

        Ok(Navigation {
            route: route_path,
            swapped,
            pushed,
            scroll,
        })
    }

    /// First navigation after loading: falls back to the root route when the
    /// current location does not validate.
    pub fn init(&mut self, location_path: &str, location_hash: &str) -> Result<Navigation, NavError> {
        let parts = decompose(&self.base_path, location_path);

        if !self.validate(&parts.route) {
            return self.navigate("/", false);
        }

        let mut request = parts.route;
        if !location_hash.is_empty() {
            if !location_hash.starts_with('#') {
                request.push('#');
            }
            request.push_str(location_hash);
        }

        self.navigate(&request, false)
    }

    /// Replay the previous history entry, as on browser back.
    pub fn back(&mut self) -> Option<Result<Navigation, NavError>> {
        let path = self.history.back()?.replay_path();
        Some(self.navigate(&path, true))
    }

    /// Replay the next history entry, as on browser forward.
    pub fn forward(&mut self) -> Option<Result<Navigation, NavError>> {
        let path = self.history.forward()?.replay_path();
        Some(self.navigate(&path, true))
    }
}

/// Resolve the post-navigation scroll command. An anchor scrolls to its
/// section container when one exists, else to the heading itself; anything
/// else goes to the top.
fn resolve_scroll(hash: &str, page: Option<&PageContent>, already_on: bool) -> ScrollTarget {
    if hash != NO_HASH {
        let id = hash.trim_start_matches('#');
        if let Some(page) = page {
            if page.section(id).is_some() {
                return ScrollTarget::Container(format!("{id}-container"));
            }
            if page.has_heading(id) {
                return ScrollTarget::Heading(id.to_string());
            }
        }
    }

    ScrollTarget::Top {
        animated: already_on,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::test_page;
    use crate::path::decompose;
    use crate::route::Route;
    use pretty_assertions::assert_eq;

    fn router() -> Router {
        let table = RouteTable::new(vec![
            Route {
                is_index: true,
                ..Route::markdown("/")
            },
            Route::markdown("/x"),
        ])
        .unwrap();

        let mut cache = ContentCache::new();
        cache.insert("/", test_page("", &["intro"]));
        cache.insert("/x", test_page("x", &["sec1", "sec2"]));

        Router::new("/handbook", table, cache)
    }

    #[test]
    fn validates_base_path_without_a_matching_route() {
        let router = router();

        assert!(router.validate("/handbook"));
        assert!(router.validate("/x"));
        assert!(!router.validate("/nope"));
    }

    #[test]
    fn unknown_route_is_an_error_and_does_not_mutate_state() {
        let mut router = router();
        router.navigate("/handbook/x", false).unwrap();

        let err = router.navigate("/handbook/nope", false).unwrap_err();

        assert!(matches!(err, NavError::UnknownRoute(r) if r == "/nope"));
        assert_eq!(router.current().unwrap().path, "/x");
        assert_eq!(router.history().len(), 1);
    }

    #[test]
    fn navigating_to_an_anchor_scrolls_its_container() {
        let mut router = router();

        let nav = router.navigate("/handbook/x#sec1", false).unwrap();

        assert!(nav.swapped);
        assert_eq!(nav.scroll, ScrollTarget::Container("sec1-container".to_string()));
    }

    #[test]
    fn heading_without_container_scrolls_the_heading() {
        let mut router = router();

        // The title heading has no section container.
        let nav = router.navigate("/handbook/x#x", false).unwrap();

        assert_eq!(nav.scroll, ScrollTarget::Heading("x".to_string()));
    }

    #[test]
    fn unresolvable_anchor_falls_back_to_top() {
        let mut router = router();

        let nav = router.navigate("/handbook/x#ghost", false).unwrap();

        assert_eq!(nav.scroll, ScrollTarget::Top { animated: false });
    }

    #[test]
    fn same_page_jump_to_top_is_animated() {
        let mut router = router();
        router.navigate("/handbook/x#sec1", false).unwrap();

        let nav = router.navigate("/handbook/x", false).unwrap();

        assert!(!nav.swapped);
        assert_eq!(nav.scroll, ScrollTarget::Top { animated: true });
    }

    #[test]
    fn pushed_path_round_trips_through_decompose() {
        let mut router = router();

        for request in ["/handbook", "/handbook/x", "/handbook/x#sec2"] {
            let wanted = decompose("/handbook", request);
            let nav = router.navigate(request, false).unwrap();
            let entry = nav.pushed.expect("entry pushed");

            let parts = decompose("/handbook", &entry.replay_path());
            assert_eq!(parts, wanted);
        }
    }

    #[test]
    fn repeated_navigation_does_not_push_a_duplicate_entry() {
        let mut router = router();

        let first = router.navigate("/handbook/x#sec1", false).unwrap();
        let second = router.navigate("/handbook/x#sec1", false).unwrap();

        assert!(first.pushed.is_some());
        assert!(second.pushed.is_none());
        assert_eq!(router.history().len(), 1);
    }

    #[test]
    fn hash_change_on_the_same_route_pushes_a_new_entry() {
        let mut router = router();
        router.navigate("/handbook/x#sec1", false).unwrap();

        let nav = router.navigate("/handbook/x#sec2", false).unwrap();

        assert!(nav.pushed.is_some());
        assert_eq!(router.history().len(), 2);
    }

    #[test]
    fn replay_never_pushes() {
        let mut router = router();
        router.navigate("/handbook", false).unwrap();
        router.navigate("/handbook/x#sec1", false).unwrap();

        let nav = router.back().unwrap().unwrap();

        assert_eq!(nav.route, "/");
        assert!(nav.pushed.is_none());
        assert_eq!(router.history().len(), 2);

        let nav = router.forward().unwrap().unwrap();
        assert_eq!(nav.route, "/x");
        assert_eq!(nav.scroll, ScrollTarget::Container("sec1-container".to_string()));
    }

    #[test]
    fn removed_route_fails_validation_and_navigation() {
        let mut router = router();
        router.table.remove("/x");

        assert!(!router.validate("/x"));
        let err = router.navigate("/handbook/x", false).unwrap_err();
        assert!(matches!(err, NavError::UnknownRoute(_)));
    }

    #[test]
    fn unloaded_route_reports_content_unavailable() {
        let table = RouteTable::new(vec![Route::markdown("/x")]).unwrap();
        let mut router = Router::new("/handbook", table, ContentCache::new());

        let err = router.navigate("/handbook/x", false).unwrap_err();

        assert!(matches!(err, NavError::ContentUnavailable(r) if r == "/x"));
        assert!(router.current().is_none());
    }

    #[test]
    fn init_falls_back_to_root_for_invalid_locations() {
        let mut router = router();

        let nav = router.init("/handbook/ghost", "").unwrap();

        assert_eq!(nav.route, "/");
        assert_eq!(nav.pushed.unwrap().path, "/handbook");
    }

    #[test]
    fn init_honors_the_existing_hash() {
        let mut router = router();

        let nav = router.init("/handbook/x", "#sec2").unwrap();

        assert_eq!(nav.route, "/x");
        assert_eq!(nav.scroll, ScrollTarget::Container("sec2-container".to_string()));
    }

    #[test]
    fn root_route_pushes_the_bare_base_path() {
        let mut router = router();

        let nav = router.navigate("/handbook", false).unwrap();

        assert_eq!(nav.pushed.unwrap().path, "/handbook");
    }
}
