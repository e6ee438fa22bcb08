//! Response plumbing shared by the Google API clients.
//!
//! Each helper returns a small failure type; callers convert it into their
//! own error enum with `?`.

use reqwest::{Response, Url};
use serde::de::DeserializeOwned;

/// Error bodies are truncated to this many bytes before landing in errors.
const MAX_ERROR_BODY: usize = 512;

/// A non-2xx response.
#[derive(Debug)]
pub struct StatusFailure {
    pub status: u16,
    pub url: String,
    pub body: String,
}

/// A response body that could not be read or decoded.
#[derive(Debug)]
pub enum BodyFailure {
    Read(reqwest::Error),
    Decode {
        context: String,
        source: serde_json::Error,
    },
}

#[derive(Debug)]
pub struct InvalidBase {
    pub url: String,
    pub reason: String,
}

/// Trims trailing slashes and checks that `base` parses as a URL.
///
/// # Errors
///
/// Returns [`InvalidBase`] when the trimmed value is not a URL.
pub fn normalise_base(base: &str) -> Result<String, InvalidBase> {
    let trimmed = base.trim_end_matches('/');
    Url::parse(trimmed).map_err(|e| InvalidBase {
        url: base.to_owned(),
        reason: e.to_string(),
    })?;
    Ok(trimmed.to_owned())
}

/// Passes 2xx responses through; anything else becomes a [`StatusFailure`]
/// carrying the (truncated) body.
///
/// # Errors
///
/// Returns [`StatusFailure`] for any non-2xx status.
pub async fn ensure_success(response: Response, url: &str) -> Result<Response, StatusFailure> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = truncate_body(response.text().await.unwrap_or_default());
    Err(StatusFailure {
        status: status.as_u16(),
        url: url.to_owned(),
        body,
    })
}

/// Reads the whole body and decodes it as JSON.
///
/// # Errors
///
/// Returns [`BodyFailure::Read`] if the body cannot be read and
/// [`BodyFailure::Decode`] if it is not the expected JSON.
pub async fn read_json<T: DeserializeOwned>(
    response: Response,
    context: &str,
) -> Result<T, BodyFailure> {
    let body = response.text().await.map_err(BodyFailure::Read)?;
    serde_json::from_str(&body).map_err(|e| BodyFailure::Decode {
        context: context.to_owned(),
        source: e,
    })
}

fn truncate_body(mut body: String) -> String {
    if body.len() > MAX_ERROR_BODY {
        let mut cut = MAX_ERROR_BODY;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        body.truncate(cut);
    }
    body
}
