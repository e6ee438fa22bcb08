//! `list-folder` command.

use anyhow::Context;
use intake_core::AppConfig;
use intake_drive::{FolderRef, ObjectStore};

use crate::upload::build_drive_client;

/// Prints the folder's children as `<name>\t<id>\t<link>` lines.
///
/// # Errors
///
/// Returns an error if the reference does not parse, the folder does not
/// exist, or the listing fails.
pub(crate) async fn run_list_folder(
    config: &AppConfig,
    raw_ref: &str,
    limit: Option<u32>,
) -> anyhow::Result<()> {
    let folder_ref =
        FolderRef::parse(raw_ref).with_context(|| format!("not a folder reference: {raw_ref}"))?;
    let client = build_drive_client(config)?;

    if client.get_by_id(folder_ref.id()).await?.is_none() {
        anyhow::bail!("folder {folder_ref} does not exist");
    }

    let files = client
        .list_files(folder_ref.id(), limit.unwrap_or(config.folder_list_limit))
        .await?;

    if files.is_empty() {
        println!("folder {folder_ref} is empty");
        return Ok(());
    }

    for file in &files {
        println!(
            "{}\t{}\t{}",
            file.name,
            file.id,
            file.web_view_link.as_deref().unwrap_or("\u{2014}")
        );
    }
    Ok(())
}
