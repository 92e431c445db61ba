//! CLI argument definitions for filedocs.
//!
//! All `clap` structures live here so that `main.rs` stays focused on
//! dispatching subcommands. Every option can also be supplied through a
//! `FILEDOCS_*` environment variable.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// filedocs -- JSON documents on disk behind a small HTTP API.
#[derive(Parser)]
#[command(
    name = "filedocs",
    version,
    about = "filedocs -- JSON documents on disk behind a small HTTP API",
    long_about = "Serves directories of JSON documents stored as plain files. \
                  Each directory is a folder under the storage root and each \
                  document is a <title>.json file inside it."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server.
    Serve {
        /// Address to bind the HTTP server to.
        #[arg(long, env = "FILEDOCS_BIND", default_value = "127.0.0.1")]
        bind: String,

        /// Port to listen on.
        #[arg(long, short, env = "FILEDOCS_PORT", default_value_t = 5000)]
        port: u16,

        /// Storage root holding one folder per directory.
        #[arg(long, short, env = "FILEDOCS_ROOT", default_value = "files")]
        root: PathBuf,
    },

    /// Scan the storage root and print its directories and documents.
    Tree {
        /// Storage root holding one folder per directory.
        #[arg(long, short, env = "FILEDOCS_ROOT", default_value = "files")]
        root: PathBuf,
    },
}
