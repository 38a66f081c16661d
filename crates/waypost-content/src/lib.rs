//! Content loading for waypost handbooks.
//!
//! Fetches raw markdown or HTML per route, converts markdown into a
//! sectioned page (sub-headings become addressable containers), applies
//! configured class tokens, sanitizes the result, and populates the
//! content cache. Routes whose backing resource is missing are removed
//! from the table for the rest of the session.

pub mod loader;
pub mod markdown;
pub mod sanitize;
pub mod source;
pub mod style;

pub use loader::{LoadError, Loader};
pub use markdown::{convert, ConvertedPage};
pub use sanitize::sanitize;
pub use source::{ContentSource, DirSource, MemorySource, SourceError};
pub use style::{StyleError, StyleSheet, StyledTag};
