//! Headless navigation core for waypost handbooks.
//!
//! This crate owns the pure routing state: path decomposition, the route
//! table, the content cache, a history model, and the navigation state
//! machine. It performs no I/O; content is loaded by `waypost-content` and
//! the effects of a navigation (content swap, history push, scroll command)
//! are returned to the host instead of applied to an ambient document.

pub mod cache;
pub mod history;
pub mod page;
pub mod path;
pub mod route;
pub mod router;

pub use cache::ContentCache;
pub use history::{History, HistoryEntry, HistoryState};
pub use page::{PageContent, PageTitle, Section};
pub use path::{decompose, PathParts, NO_HASH};
pub use route::{NavOptions, ResourceKind, Route, RouteTable, TableError};
pub use router::{NavError, Navigation, Router, ScrollTarget};
