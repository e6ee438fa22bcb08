//! `upload` command: one product snapshot through the pipeline.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use intake_core::{AppConfig, ProductUploadRequest, UploadOutcome};
use intake_drive::{DriveClient, RootFolderCache};
use intake_pipeline::{ImageFetcher, ProductUploader};
use intake_sheets::{ProductRow, SheetsClient};

/// Runs the pipeline for the product in `product_path` and prints the
/// outcome as pretty JSON on stdout.
///
/// # Errors
///
/// Returns an error if the snapshot cannot be read, a client cannot be
/// built, or the pipeline fails fatally. Sheet sync failures are logged and
/// do not fail the command.
pub(crate) async fn run_upload(
    config: &AppConfig,
    product_path: &Path,
    no_sheet: bool,
) -> anyhow::Result<()> {
    let product = read_product(product_path)?;

    let uploader = build_uploader(config)?;
    let outcome = uploader.upload_product_to_drive(&product).await?;

    if !no_sheet {
        sync_sheet(config, &product, &outcome).await;
    }

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}

fn read_product(path: &Path) -> anyhow::Result<ProductUploadRequest> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read product snapshot {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse product snapshot {}", path.display()))
}

pub(crate) fn build_drive_client(config: &AppConfig) -> anyhow::Result<DriveClient> {
    Ok(DriveClient::with_base_urls(
        &config.drive_access_token,
        config.request_timeout_secs,
        &config.user_agent,
        &config.drive_api_base,
        &config.drive_upload_base,
    )?)
}

fn build_uploader(config: &AppConfig) -> anyhow::Result<ProductUploader> {
    let store = Arc::new(build_drive_client(config)?);
    let fetcher = ImageFetcher::new(
        config.request_timeout_secs,
        &config.user_agent,
        config.fetch_max_retries,
        config.fetch_retry_delay_ms,
    )?;

    let mut uploader =
        ProductUploader::new(store, fetcher).with_folder_list_limit(config.folder_list_limit);
    if let Some(name) = &config.drive_root_folder_name {
        uploader = uploader.with_root_folder(RootFolderCache::new(name));
    }
    Ok(uploader)
}

async fn sync_sheet(config: &AppConfig, product: &ProductUploadRequest, outcome: &UploadOutcome) {
    let Some(sheets) = &config.sheets else {
        tracing::debug!("no spreadsheet configured; skipping sheet sync");
        return;
    };

    let client = match SheetsClient::from_config(
        &config.drive_access_token,
        config.request_timeout_secs,
        &config.user_agent,
        sheets,
    ) {
        Ok(client) => client,
        Err(e) => {
            tracing::warn!(error = %e, "could not build sheets client; skipping sheet sync");
            return;
        }
    };

    let row = ProductRow::from_outcome(product, outcome, chrono::Utc::now());
    if let Err(e) = client.upsert_product_row(&row).await {
        tracing::warn!(
            product_id = %product.id,
            spreadsheet_id = %sheets.spreadsheet_id,
            error = %e,
            "sheet sync failed; drive upload is unaffected"
        );
    }
}
