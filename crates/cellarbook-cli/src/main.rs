//! Cellarbook CLI: ingest and reap catalog photos on the local filesystem.
//!
//! Configuration comes from the environment (and `.env`): UPLOAD_FOLDER,
//! THUMBNAIL_FOLDER, ALLOWED_EXTENSIONS, MAX_CONTENT_LENGTH and the
//! IMAGE_/THUMBNAIL_ size and quality settings.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use cellarbook_cli::{init_tracing, ErrorReport};
use cellarbook_core::{Config, UploadCandidate};
use cellarbook_processing::{AssetReaper, ImageIngestionPipeline};
use cellarbook_storage::LocalAssetStore;
use clap::{Parser, Subcommand};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "cellarbook", about = "Cellarbook photo storage tools")]
struct Cli {
    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest an image file, storing a primary and a thumbnail JPEG
    Ingest {
        /// Path to the image to ingest
        file: PathBuf,
        /// Declared filename (defaults to the file's own name)
        #[arg(long)]
        name: Option<String>,
        /// Declared Content-Type; only logged, never trusted
        #[arg(long)]
        content_type: Option<String>,
    },
    /// Delete a stored pair by its logical paths
    Delete {
        /// Logical primary path, e.g. uploads/<name>.jpg
        #[arg(long)]
        primary: Option<String>,
        /// Logical thumbnail path, e.g. uploads/thumbnails/thumb_<name>.jpg
        #[arg(long)]
        thumbnail: Option<String>,
    },
    /// Print the effective ingestion settings
    Config,
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize output")?;
    println!("{}", out);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let config = Config::from_env().context("Load configuration")?;
    let settings = Arc::new(config.ingest.clone());
    tracing::debug!(
        environment = %config.environment(),
        upload_dir = %config.dirs().upload_dir.display(),
        thumbnail_dir = %config.dirs().thumbnail_dir.display(),
        "Configuration loaded"
    );

    match cli.command {
        Commands::Ingest {
            file,
            name,
            content_type,
        } => {
            LocalAssetStore::new()
                .ensure_dirs(config.dirs())
                .await
                .context("Create storage directories")?;

            let mut candidate = UploadCandidate::open(&file)
                .await
                .with_context(|| format!("Open {}", file.display()))?;
            if let Some(name) = name {
                candidate = UploadCandidate::new(name, candidate.into_body());
            }
            if let Some(content_type) = content_type {
                candidate = candidate.with_content_type(content_type);
            }

            let pipeline = ImageIngestionPipeline::local(settings);
            match pipeline.ingest(Some(candidate)).await {
                Ok(pair) => print_json(&pair)?,
                Err(e) => {
                    print_json(&ErrorReport::from(&e))?;
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
        Commands::Delete { primary, thumbnail } => {
            let reaper = AssetReaper::local(Some(settings));
            reaper.delete(primary.as_deref(), thumbnail.as_deref()).await;
            print_json(&serde_json::json!({ "success": true }))?;
        }
        Commands::Config => {
            print_json(&serde_json::json!({
                "environment": config.environment(),
                "production": config.is_production(),
                "ingest": config.ingest,
            }))?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
