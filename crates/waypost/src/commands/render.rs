//! Static render command.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;

use waypost_content::{DirSource, Loader};
use waypost_router::ContentCache;
use waypost_server::{render_site, RenderConfig};

use crate::config::Config;

/// Run the render command.
pub async fn run(config_path: &Path, output: Option<PathBuf>) -> Result<()> {
    tracing::info!("Rendering handbook...");

    let config = Config::load(config_path)?;
    let mut table = config.route_table()?;
    let styles = config.style_sheet()?;

    let source = DirSource::new(&config.dirs.docs, config.site.base_path.as_str());
    let loader = Loader::new(Arc::new(source), config.site.base_path.clone(), styles);

    let mut cache = ContentCache::new();
    loader.load_all(&mut table, &mut cache).await;

    if table.is_empty() {
        anyhow::bail!(
            "No loadable routes; check {} and the docs directory",
            config_path.display()
        );
    }

    let render_config = RenderConfig {
        site_title: config.site.title.clone(),
        base_path: config.site.base_path.clone(),
        docs_dir: config.dirs.docs.clone(),
        output_dir: output.unwrap_or_else(|| config.dirs.output.clone()),
    };

    let site = render_site(&render_config, &table, &cache)?;

    tracing::info!("Rendered {} pages in {}ms", site.pages.len(), site.duration_ms);

    if !site.orphans.is_empty() {
        tracing::warn!("{} resource(s) have no route", site.orphans.len());
    }

    Ok(())
}
