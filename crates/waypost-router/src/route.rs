//! Route descriptors and the ordered route table.

use serde::Deserialize;

/// Kind of resource backing a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// Raw markdown, converted to a sectioned page on load.
    #[default]
    #[serde(rename = "md")]
    Markdown,

    /// Pre-rendered HTML, sanitized and stored unsectioned.
    Html,
}

impl ResourceKind {
    /// File extension used when building the resource request path.
    pub fn extension(self) -> &'static str {
        match self {
            ResourceKind::Markdown => "md",
            ResourceKind::Html => "html",
        }
    }
}

/// Sidebar options attached to a route.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct NavOptions {
    /// Suppress sub-heading entries for this route in the sidebar.
    #[serde(default)]
    pub ignore_sections: bool,
}

/// A route descriptor. Loaded content is kept in
/// [`ContentCache`](crate::ContentCache), not on the route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Canonical identifier, unique across the table, always starts with `/`.
    pub path: String,

    /// Resource type backing this route.
    pub kind: ResourceKind,

    /// Forces the backing resource filename to `index` regardless of `path`.
    pub is_index: bool,

    /// Alternate accepted path. Accepted in configuration but not consulted
    /// by lookup or validation.
    pub alias: Option<String>,

    /// Sidebar options.
    pub nav: NavOptions,
}

impl Route {
    /// Create a markdown route with default options.
    pub fn markdown(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: ResourceKind::Markdown,
            is_index: false,
            alias: None,
            nav: NavOptions::default(),
        }
    }

    /// Path stem used to name the backing resource: `/index` for index
    /// routes, the route path otherwise.
    pub fn resource_stem(&self) -> &str {
        if self.is_index {
            "/index"
        } else {
            &self.path
        }
    }

    /// Route path without its leading slash; empty for the root route.
    pub fn slug(&self) -> &str {
        self.path.trim_start_matches('/')
    }
}

/// Errors raised when assembling a route table.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("Duplicate route path: {0}")]
    DuplicatePath(String),

    #[error("Route path must start with '/': {0}")]
    InvalidPath(String),
}

/// Ordered, in-memory list of route descriptors.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// Build a table, enforcing path format and uniqueness.
    pub fn new(routes: Vec<Route>) -> Result<Self, TableError> {
        for (i, route) in routes.iter().enumerate() {
            if !route.path.starts_with('/') {
                return Err(TableError::InvalidPath(route.path.clone()));
            }
            if routes[..i].iter().any(|r| r.path == route.path) {
                return Err(TableError::DuplicatePath(route.path.clone()));
            }
        }

        Ok(Self { routes })
    }

    /// Look up a route by its canonical path. No alias or partial matching.
    pub fn find(&self, path: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.path == path)
    }

    /// Whether a route with the given path exists.
    pub fn contains(&self, path: &str) -> bool {
        self.find(path).is_some()
    }

    /// Remove a route by path. Removal is permanent for the session: the
    /// route becomes unnavigable and disappears from sidebar generation on
    /// the next hydrate.
    pub fn remove(&mut self, path: &str) -> bool {
        let before = self.routes.len();
        self.routes.retain(|r| r.path != path);
        self.routes.len() != before
    }

    /// Iterate routes in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
