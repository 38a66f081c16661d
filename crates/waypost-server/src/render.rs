//! Static page rendering.
//!
//! `render_site` writes one self-contained HTML page per surviving route
//! plus the client-side routing shell, mirroring what the viewer would
//! display after hydrating that route.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use rayon::prelude::*;
use walkdir::WalkDir;

use waypost_nav::Nav;
use waypost_router::{ContentCache, Route, RouteTable};

use crate::templates::{PageContext, ShellContext, TemplateEngine};

/// Configuration for rendering the handbook to static pages.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Site title used in the shell and page heads.
    pub site_title: String,

    /// Handbook base path, e.g. `/handbook`.
    pub base_path: String,

    /// Directory holding the markdown resources (for orphan detection).
    pub docs_dir: PathBuf,

    /// Output directory for rendered pages.
    pub output_dir: PathBuf,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            site_title: "Handbook".to_string(),
            base_path: "/handbook".to_string(),
            docs_dir: PathBuf::from("handbook"),
            output_dir: PathBuf::from("dist/handbook"),
        }
    }
}

/// Errors raised while rendering.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Failed to render template: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Failed to write {0}: {1}")]
    Write(PathBuf, String),
}

/// Result of a render run.
#[derive(Debug)]
pub struct RenderedSite {
    /// Pages written, in route order.
    pub pages: Vec<PathBuf>,

    /// Markdown files in the docs directory not covered by any route.
    pub orphans: Vec<PathBuf>,

    pub duration_ms: u64,
}

/// Render every route with cached content to a static page, write the
/// shell, and report orphaned markdown files. Routes without content are
/// skipped the same way the sidebar skips them.
pub fn render_site(
    config: &RenderConfig,
    table: &RouteTable,
    cache: &ContentCache,
) -> Result<RenderedSite, RenderError> {
    let start = Instant::now();
    let engine = TemplateEngine::new();

    fs::create_dir_all(&config.output_dir)
        .map_err(|e| RenderError::Write(config.output_dir.clone(), e.to_string()))?;

    let shell = engine.render_shell(&ShellContext {
        site_title: config.site_title.clone(),
        base_path: config.base_path.clone(),
    })?;
    let shell_path = config.output_dir.join("handbook.html");
    fs::write(&shell_path, shell).map_err(|e| RenderError::Write(shell_path, e.to_string()))?;

    let routes: Vec<&Route> = table.iter().collect();

    let pages: Vec<PathBuf> = routes
        .par_iter()
        .filter_map(|route| render_page(config, &engine, table, cache, route).transpose())
        .collect::<Result<Vec<_>, _>>()?;

    let orphans = find_orphans(config, table);

    tracing::info!(
        "Rendered {} pages to {}",
        pages.len(),
        config.output_dir.display()
    );

    Ok(RenderedSite {
        pages,
        orphans,
        duration_ms: start.elapsed().as_millis() as u64,
    })
}

/// Render one route. Returns `None` when the route has no cached content.
fn render_page(
    config: &RenderConfig,
    engine: &TemplateEngine,
    table: &RouteTable,
    cache: &ContentCache,
    route: &Route,
) -> Result<Option<PathBuf>, RenderError> {
    let Some(page) = cache.get(&route.path) else {
        tracing::warn!("No content for {}, skipping page", route.path);
        return Ok(None);
    };

    // Each page gets the sidebar with its own route highlighted.
    let mut nav = Nav::new(config.site_title.clone(), config.base_path.clone());
    nav.hydrate(table, cache);
    nav.sync_active(&route.path, true);

    let html = engine.render_page(&PageContext {
        title: page.title.text.clone(),
        site_title: config.site_title.clone(),
        base_path: config.base_path.clone(),
        sidebar: nav.render_html(),
        content: page.html.clone(),
    })?;

    let file_name = if route.slug().is_empty() {
        "index.html".to_string()
    } else {
        format!("{}.html", route.slug())
    };
    let out_path = config.output_dir.join(file_name);

    fs::write(&out_path, html).map_err(|e| RenderError::Write(out_path.clone(), e.to_string()))?;

    Ok(Some(out_path))
}

/// Scan the docs directory for markdown files no route points at.
fn find_orphans(config: &RenderConfig, table: &RouteTable) -> Vec<PathBuf> {
    let stems: Vec<String> = table
        .iter()
        .map(|r| r.resource_stem().trim_start_matches('/').to_string())
        .collect();

    let mut orphans = Vec::new();

    for entry in WalkDir::new(&config.docs_dir)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if ext != "md" && ext != "html" {
            continue;
        }

        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
        if !stems.iter().any(|s| s == stem) {
            tracing::warn!("Orphaned resource with no route: {}", path.display());
            orphans.push(path.to_path_buf());
        }
    }

    orphans
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::tempdir;
    use waypost_content::{Loader, MemorySource, StyleSheet};

    fn fixture_loader() -> Loader {
        let mut source = MemorySource::new();
        source.insert("/handbook/index.md", "# Welcome\n\nStart here.");
        source.insert(
            "/handbook/flight-sim.md",
            "# Flight sim\n\nIntro.\n\n## Setup\n\nInstall.",
        );
        Loader::new(Arc::new(source), "/handbook", StyleSheet::none())
    }

    fn fixtures() -> (RouteTable, ContentCache) {
        let table = RouteTable::new(vec![
            Route {
                is_index: true,
                ..Route::markdown("/")
            },
            Route::markdown("/flight-sim"),
        ])
        .unwrap();
        (table, ContentCache::new())
    }

    #[tokio::test]
    async fn writes_one_page_per_route_plus_the_shell() {
        let (mut table, mut cache) = fixtures();
        fixture_loader().load_all(&mut table, &mut cache).await;

        let temp = tempdir().unwrap();
        let config = RenderConfig {
            docs_dir: temp.path().join("docs"),
            output_dir: temp.path().join("out"),
            ..RenderConfig::default()
        };

        let site = render_site(&config, &table, &cache).unwrap();

        assert_eq!(site.pages.len(), 2);
        assert!(config.output_dir.join("handbook.html").exists());
        assert!(config.output_dir.join("index.html").exists());

        let page = fs::read_to_string(config.output_dir.join("flight-sim.html")).unwrap();
        assert!(page.contains("<h2 id=\"flight-sim\">"));
        assert!(page.contains("href=\"/handbook/flight-sim#setup\""));
        assert!(page.contains("<title>Flight sim - Handbook</title>"));
    }

    #[tokio::test]
    async fn reports_markdown_files_without_routes() {
        let (mut table, mut cache) = fixtures();
        fixture_loader().load_all(&mut table, &mut cache).await;

        let temp = tempdir().unwrap();
        let docs = temp.path().join("docs");
        fs::create_dir_all(&docs).unwrap();
        fs::write(docs.join("index.md"), "# Welcome").unwrap();
        fs::write(docs.join("forgotten.md"), "# Lost").unwrap();

        let config = RenderConfig {
            docs_dir: docs.clone(),
            output_dir: temp.path().join("out"),
            ..RenderConfig::default()
        };

        let site = render_site(&config, &table, &cache).unwrap();

        assert_eq!(site.orphans, vec![docs.join("forgotten.md")]);
    }

    #[test]
    fn routes_without_content_are_skipped() {
        let (table, cache) = fixtures();

        let temp = tempdir().unwrap();
        let config = RenderConfig {
            docs_dir: temp.path().join("docs"),
            output_dir: temp.path().join("out"),
            ..RenderConfig::default()
        };

        let site = render_site(&config, &table, &cache).unwrap();

        assert!(site.pages.is_empty());
        // The shell is written regardless.
        assert!(config.output_dir.join("handbook.html").exists());
    }
}
