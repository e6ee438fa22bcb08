use intake_drive::http::{BodyFailure, InvalidBase, StatusFailure};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SheetsError {
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

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl From<StatusFailure> for SheetsError {
    fn from(f: StatusFailure) -> Self {
        SheetsError::UnexpectedStatus {
            status: f.status,
            url: f.url,
            body: f.body,
        }
    }
}

impl From<BodyFailure> for SheetsError {
    fn from(f: BodyFailure) -> Self {
        match f {
            BodyFailure::Read(e) => SheetsError::Http(e),
            BodyFailure::Decode { context, source } => SheetsError::Deserialize { context, source },
        }
    }
}

impl From<InvalidBase> for SheetsError {
    fn from(f: InvalidBase) -> Self {
        SheetsError::InvalidBaseUrl {
            url: f.url,
            reason: f.reason,
        }
    }
}
