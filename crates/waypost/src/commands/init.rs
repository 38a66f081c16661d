//! Initialize a handbook in a project.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub async fn run(yes: bool) -> Result<()> {
    tracing::info!("Initializing waypost...");

    let docs_dir = Path::new("handbook");

    if docs_dir.exists() {
        if !yes {
            tracing::warn!("handbook/ directory already exists. Use --yes to overwrite.");
            return Ok(());
        }
    } else {
        fs::create_dir_all(docs_dir).context("Failed to create handbook directory")?;
    }

    let config_path = Path::new("handbook.toml");
    if !config_path.exists() || yes {
        fs::write(config_path, DEFAULT_CONFIG).context("Failed to write handbook.toml")?;
        tracing::info!("Created handbook.toml");
    }

    let index_path = docs_dir.join("index.md");
    if !index_path.exists() || yes {
        fs::write(&index_path, DEFAULT_INDEX).context("Failed to write index.md")?;
        tracing::info!("Created handbook/index.md");
    }

    let getting_started_path = docs_dir.join("getting-started.md");
    if !getting_started_path.exists() || yes {
        fs::write(&getting_started_path, DEFAULT_GETTING_STARTED)
            .context("Failed to write getting-started.md")?;
        tracing::info!("Created handbook/getting-started.md");
    }

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'waypost render' and then 'waypost serve' to view your handbook.");

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# Waypost Configuration

[site]
# Title shown in the shell and sidebar
title = "Handbook"

# Path prefix every handbook URL lives under
base_path = "/handbook"

[dirs]
# Markdown resources
docs = "handbook"

# Static assets served under /assets
assets = "assets"

# Rendered output
output = "dist/handbook"

# One entry per page, in sidebar order. The first heading of each document
# becomes its page title.
[[routes]]
path = "/"
index = true

[[routes]]
path = "/getting-started"
"#;

const DEFAULT_INDEX: &str = r#"# Welcome

This is your handbook, powered by **waypost**.

## Reading

Use the sidebar to move between pages. Section links scroll straight to
their heading.

## Editing

Every page is a markdown file in the `handbook/` directory. Add a
`[[routes]]` entry in `handbook.toml` for each new file.
"#;

const DEFAULT_GETTING_STARTED: &str = r#"# Getting started

How to work with this handbook.

## Structure

Each markdown file becomes one page. The first `#` heading is the page
title; every `##` heading opens a section that gets its own sidebar link.

## Rendering

```bash
waypost render
```

## Serving

```bash
waypost serve
```

> Tip: pass `--verbose` to see which routes loaded.
"#;
