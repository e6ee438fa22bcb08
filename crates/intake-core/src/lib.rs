//! Shared domain types and configuration for the product intake workspace.

mod app_config;
mod config;
mod product;

use thiserror::Error;

pub use app_config::{AppConfig, Environment, SheetsConfig};
pub use config::{load_app_config, load_app_config_from_env};
pub use product::{FailedImage, ImageDescriptor, ProductUploadRequest, UploadOutcome, UploadedFile};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
