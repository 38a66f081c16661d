//! Waypost CLI - markdown-driven handbook viewer.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "waypost")]
#[command(about = "Markdown-driven handbook viewer")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to handbook.toml config file
    #[arg(short, long, default_value = "handbook.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a handbook in the current project
    Init {
        /// Skip interactive prompts, use defaults
        #[arg(short, long)]
        yes: bool,
    },

    /// Render the handbook to static pages
    Render {
        /// Output directory (defaults to config or "dist/handbook")
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Serve the rendered handbook
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Do not open browser
        #[arg(long)]
        no_open: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(yes).await?;
        }
        Commands::Render { output } => {
            commands::render::run(&cli.config, output).await?;
        }
        Commands::Serve { port, no_open } => {
            commands::serve::run(&cli.config, port, !no_open).await?;
        }
    }

    Ok(())
}
