//! Fetch seam for route resources.
//!
//! Resources are requested by their full path, `{base_path}{stem}.{ext}`,
//! mirroring the HTTP contract of the static server: a successful fetch
//! returns the raw body text, a missing resource maps to
//! [`SourceError::NotFound`]. Sources must serve fresh content on every
//! call (no caching layer of their own).

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;

/// Errors raised by a content source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The resource does not exist (the non-200 case).
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Any other fetch failure.
    #[error("Failed to read {0}: {1}")]
    Io(String, String),
}

/// Provides raw resource text for the loader.
pub trait ContentSource: Send + Sync {
    /// Fetch the raw text behind `request_path`.
    fn fetch(&self, request_path: &str) -> Result<String, SourceError>;
}

/// Reads resources from a directory on disk, the same files the static
/// server exposes under the base path.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
    base_path: String,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>, base_path: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            base_path: base_path.into(),
        }
    }
}

impl ContentSource for DirSource {
    fn fetch(&self, request_path: &str) -> Result<String, SourceError> {
        let relative = request_path
            .strip_prefix(&self.base_path)
            .unwrap_or(request_path)
            .trim_start_matches('/');

        let path = self.root.join(relative);

        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(text),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                Err(SourceError::NotFound(request_path.to_string()))
            }
            Err(err) => Err(SourceError::Io(request_path.to_string(), err.to_string())),
        }
    }
}

/// In-memory source, keyed by request path.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    resources: HashMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resource under its request path.
    pub fn insert(&mut self, request_path: impl Into<String>, body: impl Into<String>) {
        self.resources.insert(request_path.into(), body.into());
    }
}

impl ContentSource for MemorySource {
    fn fetch(&self, request_path: &str) -> Result<String, SourceError> {
        self.resources
            .get(request_path)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(request_path.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn dir_source_strips_the_base_path() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("index.md"), "# Home").unwrap();

        let source = DirSource::new(temp.path(), "/handbook");

        assert_eq!(source.fetch("/handbook/index.md").unwrap(), "# Home");
    }

    #[test]
    fn missing_files_map_to_not_found() {
        let temp = tempdir().unwrap();
        let source = DirSource::new(temp.path(), "/handbook");

        let err = source.fetch("/handbook/ghost.md").unwrap_err();

        assert!(matches!(err, SourceError::NotFound(p) if p == "/handbook/ghost.md"));
    }

    #[test]
    fn memory_source_serves_registered_bodies() {
        let mut source = MemorySource::new();
        source.insert("/handbook/x.md", "# X");

        assert_eq!(source.fetch("/handbook/x.md").unwrap(), "# X");
        assert!(source.fetch("/handbook/y.md").is_err());
    }
}
