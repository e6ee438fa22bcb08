//! Pipeline entry point.

use std::sync::Arc;

use intake_core::{ProductUploadRequest, UploadOutcome};
use intake_drive::{ObjectStore, RootFolderCache};

use crate::error::PipelineError;
use crate::fetcher::ImageFetcher;
use crate::folder::resolve_folder;
use crate::orchestrator::upload_images;

const DEFAULT_FOLDER_LIST_LIMIT: u32 = 1000;

/// Uploads products into the remote store, one sequential run per product.
///
/// Runs for different products may proceed concurrently. Two concurrent runs
/// for the same product can assign colliding file names; callers serialize
/// those.
pub struct ProductUploader {
    store: Arc<dyn ObjectStore>,
    fetcher: ImageFetcher,
    root_folder: Option<RootFolderCache>,
    folder_list_limit: u32,
}

impl ProductUploader {
    #[must_use]
    pub fn new(store: Arc<dyn ObjectStore>, fetcher: ImageFetcher) -> Self {
        Self {
            store,
            fetcher,
            root_folder: None,
            folder_list_limit: DEFAULT_FOLDER_LIST_LIMIT,
        }
    }

    /// Creates new product folders inside the named root folder.
    #[must_use]
    pub fn with_root_folder(mut self, root_folder: RootFolderCache) -> Self {
        self.root_folder = Some(root_folder);
        self
    }

    /// Caps how many children are scanned when reusing a folder. Zero is
    /// treated as one.
    #[must_use]
    pub fn with_folder_list_limit(mut self, limit: u32) -> Self {
        self.folder_list_limit = limit.max(1);
        self
    }

    /// Uploads `product`'s images into its remote folder.
    ///
    /// Partial success returns normally; the images that failed are listed in
    /// [`UploadOutcome::failed_images`]. A product with no images, or only
    /// images without any source URL, also returns normally.
    ///
    /// # Errors
    ///
    /// - [`PipelineError::Drive`] when the target folder cannot be resolved
    ///   or created.
    /// - [`PipelineError::TotalFailure`] when at least one image was attempted
    ///   and none was uploaded.
    pub async fn upload_product_to_drive(
        &self,
        product: &ProductUploadRequest,
    ) -> Result<UploadOutcome, PipelineError> {
        tracing::info!(
            product_id = %product.id,
            images = product.images.len(),
            "starting drive upload"
        );

        let folder = resolve_folder(
            self.store.as_ref(),
            product,
            self.root_folder.as_ref(),
            self.folder_list_limit,
        )
        .await?;

        let report = upload_images(
            self.store.as_ref(),
            &self.fetcher,
            product,
            &folder.folder_id,
            folder.starting_sequence,
        )
        .await;

        if report.attempted() > 0 && report.uploaded.is_empty() {
            tracing::error!(
                product_id = %product.id,
                folder_id = %folder.folder_id,
                total = product.images.len(),
                "no images uploaded"
            );
            return Err(PipelineError::TotalFailure {
                product_id: product.id.clone(),
                total: product.images.len(),
            });
        }

        tracing::info!(
            product_id = %product.id,
            folder_id = %folder.folder_id,
            uploaded = report.uploaded.len(),
            failed = report.failed.len(),
            skipped = report.skipped.len(),
            folder_reused = folder.reused,
            "drive upload finished"
        );

        Ok(UploadOutcome {
            folder_id: folder.folder_id,
            folder_url: folder.folder_url,
            folder_reused: folder.reused,
            uploaded_files: report.uploaded,
            failed_images: report.failed,
            skipped_images: report.skipped,
        })
    }
}
