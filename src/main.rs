//! # Contact Directory CLI (`contacts`)
//!
//! ## Usage
//!
//! ```bash
//! contacts [--config ./contacts.toml] <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `contacts serve` | Start the HTTP server |
//! | `contacts openapi` | Print the OpenAPI document to stdout |
//!
//! Logging goes to stderr and is controlled by `RUST_LOG`
//! (default level `info`).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use contact_directory::{api_docs, config, server};

/// Contact Directory — CRUD and search over contact records via HTTP/JSON.
#[derive(Parser)]
#[command(
    name = "contacts",
    about = "Contact Directory — CRUD and search over contact records via HTTP/JSON",
    version
)]
struct Cli {
    /// Path to a TOML configuration file.
    ///
    /// When omitted, the built-in defaults apply (bind `127.0.0.1:3000`,
    /// one seed contact).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server.
    ///
    /// Seeds the in-memory store from the configuration and serves until
    /// Ctrl-C.
    Serve {
        /// Override `[server].bind` (e.g. `0.0.0.0:8080`).
        #[arg(long)]
        bind: Option<String>,
    },

    /// Print the OpenAPI document as JSON.
    Openapi,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Openapi => {
            let doc = api_docs::openapi_document();
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
        Commands::Serve { bind } => {
            let mut cfg = match &cli.config {
                Some(path) => config::load_config(path)?,
                None => config::Config::default(),
            };
            if let Some(bind) = bind {
                cfg.server.bind = bind;
                cfg.validate()?;
            }
            tracing::info!(
                seed = cfg.contacts.len(),
                bind = %cfg.server.bind,
                "starting contact directory"
            );
            server::run_server(&cfg).await?;
        }
    }

    Ok(())
}
