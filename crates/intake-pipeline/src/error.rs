use intake_drive::DriveError;
use thiserror::Error;

/// Failures that abort a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to fetch {url} after {attempts} attempt(s): {reason}")]
    Fetch {
        url: String,
        attempts: u32,
        reason: String,
    },

    #[error("drive error: {0}")]
    Drive(#[from] DriveError),

    /// Images were attempted but none were uploaded.
    #[error("0 of {total} images uploaded for product {product_id}")]
    TotalFailure { product_id: String, total: usize },
}

/// Why a single image did not end up in the remote folder.
///
/// These never abort the run; they are collected and reported.
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("image has no source URL")]
    NoSource,

    #[error("download failed: {0}")]
    Download(String),

    #[error("upload of {name} failed: {source}")]
    Upload {
        name: String,
        #[source]
        source: DriveError,
    },
}
