//! Mediagate CLI: resolve request paths against the bucket configuration.
//!
//! Set MEDIAGATE_CONFIG to the YAML configuration file (default: config/mediagate.yml).

use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use mediagate_cli::{compile_presets, init_tracing, print_json};
use mediagate_core::{AppConfig, ObjectResolver};
use mediagate_storage::ObjectFetcher;

#[derive(Parser)]
#[command(name = "mediagate", about = "Media object path resolver")]
struct Cli {
    /// Configuration file (overrides MEDIAGATE_CONFIG)
    #[arg(long, global = true)]
    config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a request path and print the object descriptor
    Resolve {
        /// Request path, e.g. /photos/t/small/2024/pic.jpg
        path: String,
        /// Also resolve and print the parent object
        #[arg(long)]
        parent: bool,
    },
    /// Print the compiled pipeline of every preset in a bucket
    Presets {
        /// Bucket name
        bucket: String,
    },
    /// Resolve a request path and download the object
    Fetch {
        /// Request path
        path: String,
        /// Output file
        #[arg(long)]
        out: std::path::PathBuf,
    },
    /// Load and validate the configuration
    Check,
}

fn load_config(path: Option<&std::path::Path>) -> anyhow::Result<AppConfig> {
    match path {
        Some(path) => AppConfig::load_from_file(path),
        None => AppConfig::from_env(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = Arc::new(
        load_config(cli.config.as_deref()).context("Failed to load configuration")?,
    );
    let resolver = ObjectResolver::new(Arc::clone(&config));

    match cli.command {
        Commands::Resolve { path, parent } => {
            let object = resolver.resolve(&path)?;
            if parent && object.has_parent() {
                let parent_object = resolver.resolve_parent(&object)?;
                print_json(&serde_json::json!({
                    "object": object,
                    "parentObject": parent_object,
                }))?;
            } else {
                print_json(&object)?;
            }
        }
        Commands::Presets { bucket } => {
            let presets = compile_presets(&config, &bucket)?;
            print_json(&presets)?;
        }
        Commands::Fetch { path, out } => {
            let fetcher = ObjectFetcher::new(resolver);
            let data = fetcher
                .fetch_path(&path)
                .await
                .with_context(|| format!("Failed to fetch {}", path))?;
            tokio::fs::write(&out, &data)
                .await
                .with_context(|| format!("Failed to write {}", out.display()))?;
            tracing::info!(path = %path, out = %out.display(), size_bytes = data.len(), "Fetched object");
        }
        Commands::Check => {
            config.validate()?;
            print_json(&serde_json::json!({
                "valid": true,
                "buckets": config.buckets().len(),
                "localPattern": config.local_pattern(),
            }))?;
        }
    }

    Ok(())
}
