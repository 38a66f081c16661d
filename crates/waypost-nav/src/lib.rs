//! Sidebar navigation for waypost handbooks.
//!
//! The sidebar is a flat list of entries, one per page title and one per
//! section heading, rebuilt wholesale whenever routes are hydrated.
//! Highlighting tracks the router's active route, and a section observer
//! keeps sub-entries in sync with which container currently sits in the
//! viewport's highlight band.

pub mod item;
pub mod nav;
pub mod observer;

pub use item::{format_label, NavItem};
pub use nav::Nav;
pub use observer::{SectionObserver, SectionRect, SectionWatch, ViewportBand};
