//! Folder resolution: reuse a product's existing remote folder or create one.
//!
//! Evaluated once per run. A stored reference that does not parse, or that
//! points at a folder which no longer exists, falls through to creating a
//! fresh folder; a missing folder must never block a re-upload.

use intake_core::ProductUploadRequest;
use intake_drive::client::folder_link;
use intake_drive::{DriveError, FolderRef, ObjectStore, RemoteFolder, RootFolderCache};

use crate::naming::{folder_display_name, next_sequence};

/// Target folder for a run and the first sequence number to assign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFolder {
    pub folder_id: String,
    pub folder_url: String,
    pub reused: bool,
    pub starting_sequence: u64,
}

/// Resolves the folder for `product`.
///
/// Reuse requires the stored reference to parse and the folder to still
/// exist; the starting sequence is then one past the highest `<n>_` prefix
/// among its children. Otherwise a folder is created (inside the root folder
/// when `root` is given), made public on a best-effort basis, and numbering
/// starts at 1.
///
/// # Errors
///
/// Returns [`DriveError`] when listing a reused folder, resolving the root
/// folder, or creating the new folder fails. Failures while looking up the
/// stored reference are logged and fall through to creation.
pub async fn resolve_folder(
    store: &dyn ObjectStore,
    product: &ProductUploadRequest,
    root: Option<&RootFolderCache>,
    list_limit: u32,
) -> Result<ResolvedFolder, DriveError> {
    if let Some(existing) = find_existing(store, product).await {
        let children = store.list_files(&existing.id, list_limit).await?;
        let starting_sequence = next_sequence(children.iter().map(|f| f.name.as_str()));
        tracing::info!(
            product_id = %product.id,
            folder_id = %existing.id,
            existing_files = children.len(),
            starting_sequence,
            "reusing existing drive folder"
        );
        return Ok(ResolvedFolder {
            folder_id: existing.id,
            folder_url: existing.url,
            reused: true,
            starting_sequence,
        });
    }

    let name = folder_display_name(&product.name, &product.id);
    let folder = create_folder(store, &name, root).await?;

    if let Err(e) = store.set_public(&folder.id).await {
        tracing::warn!(
            product_id = %product.id,
            folder_id = %folder.id,
            error = %e,
            "could not make folder public; continuing"
        );
    }

    tracing::info!(
        product_id = %product.id,
        folder_id = %folder.id,
        folder_name = %name,
        "created drive folder for product"
    );

    Ok(ResolvedFolder {
        folder_id: folder.id,
        folder_url: folder.url,
        reused: false,
        starting_sequence: 1,
    })
}

/// Looks up the folder named by the product's stored reference.
async fn find_existing(
    store: &dyn ObjectStore,
    product: &ProductUploadRequest,
) -> Option<RemoteFolder> {
    let raw = product.existing_remote_folder_ref.as_deref()?;
    let Some(folder_ref) = FolderRef::parse(raw) else {
        tracing::warn!(
            product_id = %product.id,
            folder_ref = raw,
            "stored folder reference does not parse; creating a new folder"
        );
        return None;
    };

    match store.get_by_id(folder_ref.id()).await {
        Ok(Some(record)) => Some(RemoteFolder {
            url: record
                .web_view_link
                .unwrap_or_else(|| folder_link(&record.id)),
            id: record.id,
        }),
        Ok(None) => {
            tracing::info!(
                product_id = %product.id,
                folder_id = %folder_ref,
                "stored folder no longer exists; creating a new folder"
            );
            None
        }
        Err(e) => {
            tracing::warn!(
                product_id = %product.id,
                folder_id = %folder_ref,
                error = %e,
                "folder lookup failed; creating a new folder"
            );
            None
        }
    }
}

/// Creates the product folder, re-resolving the root folder once if the
/// cached root id has gone stale.
async fn create_folder(
    store: &dyn ObjectStore,
    name: &str,
    root: Option<&RootFolderCache>,
) -> Result<RemoteFolder, DriveError> {
    let Some(root) = root else {
        return store.create_folder(name, None).await;
    };

    let parent = root.resolve(store).await?;
    match store.create_folder(name, Some(&parent)).await {
        Err(e) if e.is_not_found() => {
            tracing::warn!(
                root_folder = root.name(),
                parent_id = %parent,
                "cached root folder is gone; resolving it again"
            );
            root.invalidate().await;
            let parent = root.resolve(store).await?;
            store.create_folder(name, Some(&parent)).await
        }
        other => other,
    }
}
