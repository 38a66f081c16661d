//! Configuration file structure (handbook.toml).

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use waypost_content::{StyleError, StyleSheet};
use waypost_router::{NavOptions, ResourceKind, Route, RouteTable, TableError};

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {0}: {1}")]
    Read(PathBuf, String),

    #[error("Failed to parse {0}: {1}")]
    Parse(PathBuf, String),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Style(#[from] StyleError),
}

/// Top-level configuration.
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,

    #[serde(default)]
    pub dirs: DirsConfig,

    #[serde(default = "default_routes")]
    routes: Vec<RouteEntry>,

    /// Per-tag class token overrides, validated against the closed tag set.
    #[serde(default)]
    styles: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default = "default_base_path")]
    pub base_path: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            base_path: default_base_path(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DirsConfig {
    /// Markdown/HTML resources.
    #[serde(default = "default_docs_dir")]
    pub docs: PathBuf,

    /// Static assets served verbatim.
    #[serde(default = "default_assets_dir")]
    pub assets: PathBuf,

    /// Rendered output.
    #[serde(default = "default_output_dir")]
    pub output: PathBuf,
}

impl Default for DirsConfig {
    fn default() -> Self {
        Self {
            docs: default_docs_dir(),
            assets: default_assets_dir(),
            output: default_output_dir(),
        }
    }
}

/// One `[[routes]]` entry.
#[derive(Debug, Deserialize)]
struct RouteEntry {
    path: String,

    #[serde(default)]
    kind: ResourceKind,

    #[serde(default)]
    index: bool,

    alias: Option<String>,

    #[serde(default)]
    ignore_sections: bool,
}

fn default_title() -> String {
    "Handbook".to_string()
}
fn default_base_path() -> String {
    "/handbook".to_string()
}
fn default_docs_dir() -> PathBuf {
    PathBuf::from("handbook")
}
fn default_assets_dir() -> PathBuf {
    PathBuf::from("assets")
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("dist/handbook")
}
fn default_routes() -> Vec<RouteEntry> {
    vec![RouteEntry {
        path: "/".to_string(),
        kind: ResourceKind::Markdown,
        index: true,
        alias: None,
        ignore_sections: false,
    }]
}

impl Config {
    /// Load configuration, falling back to defaults when the file does not
    /// exist. A present-but-malformed file is a hard error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("{} not found, using defaults", path.display());
            return Ok(Self::default_with_routes());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(path.to_path_buf(), e.to_string()))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(path.to_path_buf(), e.to_string()))?;

        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn default_with_routes() -> Self {
        Self {
            routes: default_routes(),
            ..Self::default()
        }
    }

    /// Build the route table, enforcing path format and uniqueness.
    pub fn route_table(&self) -> Result<RouteTable, ConfigError> {
        let routes = self
            .routes
            .iter()
            .map(|entry| Route {
                path: entry.path.clone(),
                kind: entry.kind,
                is_index: entry.index,
                alias: entry.alias.clone(),
                nav: NavOptions {
                    ignore_sections: entry.ignore_sections,
                },
            })
            .collect();

        Ok(RouteTable::new(routes)?)
    }

    /// Build the style sheet: markdown defaults plus configured overrides.
    /// An unknown tag name in `[styles]` is a hard error.
    pub fn style_sheet(&self) -> Result<StyleSheet, ConfigError> {
        let overrides = self
            .styles
            .iter()
            .map(|(tag, tokens)| (tag.as_str(), tokens.as_str()));

        Ok(StyleSheet::markdown_default().with_overrides(overrides)?)
    }
}
