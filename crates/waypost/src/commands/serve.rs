//! Serve command.

use std::path::Path;

use anyhow::Result;

use waypost_server::{HandbookServer, ServerConfig};

use crate::config::Config;

/// Run the serve command.
pub async fn run(config_path: &Path, port: u16, open: bool) -> Result<()> {
    let config = Config::load(config_path)?;

    let shell = config.dirs.output.join("handbook.html");
    if !shell.exists() {
        anyhow::bail!(
            "Shell document not found: {}. Run 'waypost render' first.",
            shell.display()
        );
    }

    let server = HandbookServer::new(ServerConfig {
        assets_dir: config.dirs.assets.clone(),
        dist_dir: config.dirs.output.clone(),
        docs_dir: config.dirs.docs.clone(),
        host: "127.0.0.1".to_string(),
        port,
        open,
    });

    server.start().await?;

    Ok(())
}
