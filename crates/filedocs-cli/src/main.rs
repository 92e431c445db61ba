//! CLI entry point for filedocs.
//!
//! This binary provides the `filedocs` command with subcommands for serving
//! the HTTP API and inspecting a storage root.

mod cli;
mod tree;

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use filedocs_store::DocStore;
use filedocs_web::{WebConfig, WebServer};

use crate::cli::{Cli, Commands};

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { bind, port, root } => cmd_serve(bind, port, root).await,
        Commands::Tree { root } => cmd_tree(root).await,
    }
}

// ---------------------------------------------------------------------------
// Subcommand: serve
// ---------------------------------------------------------------------------

async fn cmd_serve(bind: String, port: u16, root: PathBuf) -> Result<()> {
    init_tracing("info");

    let config = WebConfig {
        bind_addr: bind,
        port,
        root,
    };

    let server = WebServer::open(config.clone())
        .await
        .with_context(|| format!("failed to open storage root {}", config.root.display()))?;

    info!(url = %format!("http://{}/api", server.addr()), "filedocs ready");

    server
        .start()
        .await
        .map_err(|e| anyhow!(e))
        .context("web server failed")
}

// ---------------------------------------------------------------------------
// Subcommand: tree
// ---------------------------------------------------------------------------

async fn cmd_tree(root: PathBuf) -> Result<()> {
    init_tracing("warn");

    let store = DocStore::open(&root)
        .await
        .with_context(|| format!("failed to open storage root {}", root.display()))?;

    println!("{}/", store.root().display());
    for line in tree::render(store.index()).lines() {
        println!("  {line}");
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Initialize the tracing subscriber with the given default log level.
fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
