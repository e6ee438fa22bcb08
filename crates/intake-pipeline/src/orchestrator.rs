//! Per-image upload loop.
//!
//! Images go up strictly one at a time in `sort_order`, so sequence numbers
//! follow the intended order even when some images fail. A failed or skipped
//! image leaves a gap in the numbering; gaps are never back-filled.

use intake_core::{FailedImage, ImageDescriptor, ProductUploadRequest, UploadedFile};
use intake_drive::ObjectStore;

use crate::error::ImageError;
use crate::extension::resolve_extension;
use crate::fetcher::{FetchedImage, ImageFetcher};
use crate::naming::{file_base_name, file_name};

/// What happened to each input image, partitioned by outcome.
#[derive(Debug, Clone, Default)]
pub struct ImageUploadReport {
    /// Successful uploads in upload order.
    pub uploaded: Vec<UploadedFile>,
    pub failed: Vec<FailedImage>,
    /// Ids of descriptors without any source URL.
    pub skipped: Vec<String>,
}

impl ImageUploadReport {
    /// Images for which a download was actually attempted.
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.uploaded.len() + self.failed.len()
    }
}

/// Uploads every image of `product` into `folder_id`.
///
/// Never fails as a whole: each image's outcome is folded into the report.
pub async fn upload_images(
    store: &dyn ObjectStore,
    fetcher: &ImageFetcher,
    product: &ProductUploadRequest,
    folder_id: &str,
    starting_sequence: u64,
) -> ImageUploadReport {
    let mut images: Vec<&ImageDescriptor> = product.images.iter().collect();
    // Stable: equal sort orders keep their input order.
    images.sort_by_key(|image| image.sort_order);

    let base_name = file_base_name(product.sku.as_deref(), &product.name, &product.id);

    let mut results: Vec<(&ImageDescriptor, Result<UploadedFile, ImageError>)> =
        Vec::with_capacity(images.len());
    for (position, image) in (0u64..).zip(images) {
        let sequence = starting_sequence.saturating_add(position);
        let result = upload_one(store, fetcher, image, folder_id, sequence, &base_name).await;
        results.push((image, result));
    }

    results
        .into_iter()
        .fold(ImageUploadReport::default(), |mut report, (image, result)| {
            match result {
                Ok(file) => report.uploaded.push(file),
                Err(ImageError::NoSource) => report.skipped.push(image.id.clone()),
                Err(e) => report.failed.push(FailedImage {
                    image_id: image.id.clone(),
                    filename: image.filename.clone(),
                    reason: e.to_string(),
                }),
            }
            report
        })
}

async fn upload_one(
    store: &dyn ObjectStore,
    fetcher: &ImageFetcher,
    image: &ImageDescriptor,
    folder_id: &str,
    sequence: u64,
    base_name: &str,
) -> Result<UploadedFile, ImageError> {
    let (primary_url, fetched) = match download(fetcher, image).await {
        Ok(found) => found,
        Err(ImageError::NoSource) => {
            tracing::info!(
                image_id = %image.id,
                filename = %image.filename,
                "image has no source URL; skipping"
            );
            return Err(ImageError::NoSource);
        }
        Err(e) => {
            tracing::warn!(
                image_id = %image.id,
                filename = %image.filename,
                error = %e,
                "image download failed; continuing with next image"
            );
            return Err(e);
        }
    };

    // Unknown MIME types fall back to the primary URL's suffix, even when the
    // bytes came from the fallback source.
    let extension = resolve_extension(&fetched.mime_type, primary_url);
    let name = file_name(sequence, base_name, extension);

    let uploaded = store
        .upload_file(&name, &fetched.mime_type, fetched.bytes, folder_id)
        .await
        .map_err(|source| {
            tracing::warn!(
                image_id = %image.id,
                file_name = %name,
                error = %source,
                "image upload failed; continuing with next image"
            );
            ImageError::Upload {
                name: name.clone(),
                source,
            }
        })?;

    if let Err(e) = store.set_public(&uploaded.id).await {
        tracing::warn!(
            image_id = %image.id,
            file_id = %uploaded.id,
            error = %e,
            "could not make file public; continuing"
        );
    }

    tracing::info!(
        image_id = %image.id,
        file_id = %uploaded.id,
        file_name = %uploaded.name,
        "uploaded image"
    );
    Ok(uploaded)
}

/// Downloads the primary source, falling back to the secondary one.
///
/// The fallback is only consulted when a primary URL exists and fails; a
/// descriptor with only a fallback URL uses it as its primary. Returns the
/// chosen primary URL alongside the bytes, whichever source served them.
async fn download<'a>(
    fetcher: &ImageFetcher,
    image: &'a ImageDescriptor,
) -> Result<(&'a str, FetchedImage), ImageError> {
    let (primary, fallback) = match (image.primary_url(), image.fallback_url()) {
        (Some(primary), fallback) => (primary, fallback),
        (None, Some(fallback)) => (fallback, None),
        (None, None) => return Err(ImageError::NoSource),
    };

    let primary_err = match fetcher.fetch_image(primary).await {
        Ok(fetched) => return Ok((primary, fetched)),
        Err(e) => e,
    };

    let Some(fallback) = fallback else {
        return Err(ImageError::Download(primary_err.to_string()));
    };

    tracing::warn!(
        image_id = %image.id,
        error = %primary_err,
        fallback_url = fallback,
        "primary source failed; trying fallback"
    );

    fetcher
        .fetch_image(fallback)
        .await
        .map(|fetched| (primary, fetched))
        .map_err(|fallback_err| {
            ImageError::Download(format!("primary: {primary_err}; fallback: {fallback_err}"))
        })
}
