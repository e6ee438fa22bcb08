//! Product-to-drive upload pipeline.
//!
//! Reconciles a product's images against an append-only remote folder:
//! resolves (or creates) the folder, downloads each image with bounded
//! retries, names it with a monotonic sequence prefix, uploads it, and
//! reports which images made it.

pub mod error;
pub mod extension;
pub mod fetcher;
pub mod folder;
pub mod naming;
pub mod orchestrator;
pub mod pipeline;

mod retry;

pub use error::{ImageError, PipelineError};
pub use extension::resolve_extension;
pub use fetcher::{FetchedImage, ImageFetcher};
pub use folder::{resolve_folder, ResolvedFolder};
pub use orchestrator::{upload_images, ImageUploadReport};
pub use pipeline::ProductUploader;
