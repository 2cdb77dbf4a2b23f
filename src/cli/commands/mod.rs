//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod check;
mod helpers;
mod ingest;
mod init;
mod pages;
mod sources;
mod upload;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{load_settings_with_options, LoadOptions};

#[derive(Parser)]
#[command(name = "pagevault")]
#[command(about = "PDF ingestion with per-page text extraction and OCR fallback")]
#[command(version)]
pub struct Cli {
    /// Target directory or database file (overrides config file).
    /// Can be a directory containing pagevault.db or a .db file directly.
    #[arg(long, short = 't', global = true)]
    target: Option<PathBuf>,

    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Resolve relative paths from current working directory instead of config file location
    #[arg(long, global = true)]
    cwd: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the data directory and database
    Init,

    /// Upload PDFs, extract their pages and store them
    Upload {
        /// PDF files to upload
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Extract and store pages of a PDF under an existing source id
    Ingest {
        /// PDF file to parse
        file: PathBuf,
        /// Source id to store pages under
        #[arg(long)]
        source_id: String,
    },

    /// Show stored pages of a source
    Pages {
        /// Source id
        source_id: String,
        /// Only show this page (1-based)
        #[arg(short, long)]
        page: Option<u32>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List uploaded sources
    Sources,

    /// Check if required PDF and OCR tools are installed
    Check,
}

/// Run the CLI.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let options = LoadOptions {
        config_path: cli.config,
        use_cwd: cli.cwd,
        target: cli.target,
    };
    let (settings, _config) = load_settings_with_options(options).await?;

    match cli.command {
        Commands::Init => init::cmd_init(&settings).await,
        Commands::Upload { files } => upload::cmd_upload(&settings, &files).await,
        Commands::Ingest { file, source_id } => {
            ingest::cmd_ingest(&settings, &file, &source_id).await
        }
        Commands::Pages {
            source_id,
            page,
            json,
        } => pages::cmd_pages(&settings, &source_id, page, json).await,
        Commands::Sources => sources::cmd_sources(&settings).await,
        Commands::Check => check::cmd_check().await,
    }
}
