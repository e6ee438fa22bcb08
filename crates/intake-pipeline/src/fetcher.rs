//! Download of image bytes from arbitrary HTTP(S) URLs.
//!
//! The fetcher knows nothing about products or folders. A non-2xx status, an
//! empty body and any transport error are all retried with a fixed delay.

use std::time::Duration;

use reqwest::Client;
use thiserror::Error;

use crate::error::PipelineError;
use crate::retry::retry_fixed_delay;

const DEFAULT_MIME_TYPE: &str = "image/jpeg";

/// Raw bytes plus the declared content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedImage {
    pub bytes: Vec<u8>,
    /// Media type essence, lowercased and stripped of parameters.
    pub mime_type: String,
}

#[derive(Debug, Error)]
enum AttemptError {
    #[error("HTTP status {0}")]
    Status(u16),

    #[error("empty response body")]
    EmptyBody,

    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

pub struct ImageFetcher {
    client: Client,
    max_retries: u32,
    retry_delay_ms: u64,
}

impl ImageFetcher {
    /// Creates a fetcher.
    ///
    /// `max_retries` is the total number of attempts per URL; `retry_delay_ms`
    /// is the constant pause between them.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        retry_delay_ms: u64,
    ) -> Result<Self, PipelineError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            max_retries,
            retry_delay_ms,
        })
    }

    /// Downloads `url`, retrying on any failure.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Fetch`] carrying the URL and the last failure
    /// reason once all attempts are used up.
    pub async fn fetch_image(&self, url: &str) -> Result<FetchedImage, PipelineError> {
        retry_fixed_delay(self.max_retries, self.retry_delay_ms, |attempt| async move {
            tracing::debug!(url, attempt, "fetching image");
            self.fetch_once(url).await
        })
        .await
        .map_err(|e| PipelineError::Fetch {
            url: url.to_owned(),
            attempts: self.max_retries.max(1),
            reason: e.to_string(),
        })
    }

    async fn fetch_once(&self, url: &str) -> Result<FetchedImage, AttemptError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AttemptError::Status(status.as_u16()));
        }

        let mime_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map_or_else(|| DEFAULT_MIME_TYPE.to_owned(), normalise_mime);

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Err(AttemptError::EmptyBody);
        }

        Ok(FetchedImage {
            bytes: bytes.to_vec(),
            mime_type,
        })
    }
}

/// `"Image/PNG; charset=binary"` becomes `"image/png"`; blank becomes the default.
fn normalise_mime(raw: &str) -> String {
    let essence = raw.split(';').next().unwrap_or_default().trim();
    if essence.is_empty() {
        DEFAULT_MIME_TYPE.to_owned()
    } else {
        essence.to_ascii_lowercase()
    }
}
