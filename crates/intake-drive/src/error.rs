use thiserror::Error;

use crate::http::{BodyFailure, InvalidBase, StatusFailure};

#[derive(Debug, Error)]
pub enum DriveError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}: {body}")]
    UnexpectedStatus {
        status: u16,
        url: String,
        body: String,
    },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("response for {context} is missing field `{field}`")]
    MissingField {
        context: String,
        field: &'static str,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl DriveError {
    /// `true` when the remote answered 404 for the addressed object.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            DriveError::UnexpectedStatus { status, .. } => *status == 404,
            DriveError::Http(e) => e.status().is_some_and(|s| s.as_u16() == 404),
            _ => false,
        }
    }
}

impl From<StatusFailure> for DriveError {
    fn from(f: StatusFailure) -> Self {
        DriveError::UnexpectedStatus {
            status: f.status,
            url: f.url,
            body: f.body,
        }
    }
}

impl From<BodyFailure> for DriveError {
    fn from(f: BodyFailure) -> Self {
        match f {
            BodyFailure::Read(e) => DriveError::Http(e),
            BodyFailure::Decode { context, source } => DriveError::Deserialize { context, source },
        }
    }
}

impl From<InvalidBase> for DriveError {
    fn from(f: InvalidBase) -> Self {
        DriveError::InvalidBaseUrl {
            url: f.url,
            reason: f.reason,
        }
    }
}
