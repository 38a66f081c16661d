//! Path decomposition and base-prefix handling.

/// Sentinel hash value for paths that carry no fragment.
pub const NO_HASH: &str = "#";

/// A navigable path split into its route and fragment parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathParts {
    /// Canonical route identifier, always starting with `/`.
    pub route: String,

    /// Fragment including the leading `#`, or [`NO_HASH`] when absent.
    pub hash: String,
}

/// Decompose a path into a route identifier and an anchor fragment.
///
/// Splits on the first `#`, strips one leading occurrence of `base_path`
/// from the route portion, and normalizes an empty route to `/`. The base
/// prefix is only stripped at a segment boundary, so a base of `/base`
/// leaves `/based/foo` untouched.
pub fn decompose(base_path: &str, path: &str) -> PathParts {
    let (raw_route, raw_hash) = match path.split_once('#') {
        Some((route, hash)) => (route, Some(hash)),
        None => (path, None),
    };

    let mut route = strip_base(base_path, raw_route);

    if route.is_empty() {
        route = "/".to_string();
    }

    let hash = match raw_hash {
        Some(h) if !h.is_empty() => format!("#{h}"),
        _ => NO_HASH.to_string(),
    };

    PathParts { route, hash }
}

/// Strip `base_path` from the front of `route` when it matches a whole
/// prefix segment.
fn strip_base(base_path: &str, route: &str) -> String {
    if base_path.is_empty() {
        return route.to_string();
    }

    match route.strip_prefix(base_path) {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.to_string(),
        _ => route.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn splits_route_and_hash() {
        let parts = decompose("/base", "/base/foo#bar");

        assert_eq!(parts.route, "/foo");
        assert_eq!(parts.hash, "#bar");
    }

    #[test]
    fn bare_base_becomes_root_with_sentinel_hash() {
        let parts = decompose("/base", "/base");

        assert_eq!(parts.route, "/");
        assert_eq!(parts.hash, NO_HASH);
    }

    #[test]
    fn strips_exactly_one_occurrence() {
        let parts = decompose("/base", "/base/base/foo");

        assert_eq!(parts.route, "/base/foo");
    }

    #[test]
    fn never_strips_a_partial_segment_match() {
        let parts = decompose("/base", "/based/foo");

        assert_eq!(parts.route, "/based/foo");
    }

    #[test]
    fn empty_base_leaves_route_alone() {
        let parts = decompose("", "/foo#s");

        assert_eq!(parts.route, "/foo");
        assert_eq!(parts.hash, "#s");
    }

    #[test]
    fn splits_on_first_hash_only() {
        let parts = decompose("", "/a#b#c");

        assert_eq!(parts.route, "/a");
        assert_eq!(parts.hash, "#b#c");
    }

    #[test]
    fn empty_fragment_is_treated_as_missing() {
        let parts = decompose("", "/a#");

        assert_eq!(parts.hash, NO_HASH);
    }
}
