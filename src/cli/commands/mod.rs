//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod analyze;
mod check;
mod process;
mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{load_config, LoadOptions};

#[derive(Parser)]
#[command(name = "contentlens")]
#[command(about = "Extract text from documents and suggest how to share them")]
#[command(version)]
pub struct Cli {
    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

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
    /// Start the upload server
    Serve {
        /// Address to bind to: port, host, or host:port (default from config)
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Upload a file to a running server and show its analysis
    Analyze {
        /// Image (JPEG, PNG, WEBP) or PDF to analyze
        file: PathBuf,
        /// Upload endpoint (default from config)
        #[arg(long, short, env = "CONTENTLENS_SERVER_URL")]
        server: Option<String>,
        /// Output the response as JSON
        #[arg(long)]
        json: bool,
    },

    /// Extract and analyze a file in-process, printing the JSON result
    Process {
        /// PDF or image to process
        file: PathBuf,
    },

    /// Check extraction tools and LLM configuration
    Check,
}

/// Run the CLI.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let options = LoadOptions {
        config_path: cli.config,
    };
    let config = load_config(options).await;

    match cli.command {
        Commands::Serve { bind } => serve::cmd_serve(&config, bind.as_deref()).await,
        Commands::Analyze { file, server, json } => {
            analyze::cmd_analyze(&config, &file, server.as_deref(), json).await
        }
        Commands::Process { file } => process::cmd_process(&config, &file).await,
        Commands::Check => check::cmd_check(&config).await,
    }
}
