mod folder;
mod upload;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "intake-cli")]
#[command(about = "Upload product images to Google Drive")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Upload one product's images and print the outcome as JSON
    Upload {
        /// Path to a product snapshot JSON file
        #[arg(long)]
        product: PathBuf,
        /// Skip the spreadsheet sync even when a spreadsheet is configured
        #[arg(long)]
        no_sheet: bool,
    },
    /// List the files inside a drive folder
    ListFolder {
        /// Folder link or bare folder id
        folder_ref: String,
        /// Maximum number of files to list (defaults to the configured limit)
        #[arg(long)]
        limit: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = intake_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    // Production logs go to collectors: no colour codes, no module targets.
    let interactive = !config.env.is_production();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(interactive)
        .with_target(interactive)
        .init();

    match cli.command {
        Commands::Upload { product, no_sheet } => {
            upload::run_upload(&config, &product, no_sheet).await?;
        }
        Commands::ListFolder { folder_ref, limit } => {
            folder::run_list_folder(&config, &folder_ref, limit).await?;
        }
    }

    Ok(())
}
