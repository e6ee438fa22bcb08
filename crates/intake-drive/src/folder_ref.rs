//! Typed parsing of stored folder references.
//!
//! Products persist whatever link the last run returned. A reference that
//! does not parse is treated as absent by callers, never as an error.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use reqwest::Url;

static FOLDER_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{10,}$").expect("valid folder id regex"));

/// Id of a remote folder extracted from a stored link or bare id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FolderRef(String);

impl FolderRef {
    /// Parses a folder reference.
    ///
    /// Accepted shapes:
    /// - `https://drive.google.com/drive/folders/{id}` (trailing segments and
    ///   query string ignored, `/u/0/` style prefixes allowed)
    /// - `https://drive.google.com/open?id={id}`
    /// - either of the above without the `https://` scheme
    /// - a bare id
    ///
    /// Returns `None` for anything else, including ids with characters outside
    /// `[A-Za-z0-9_-]` or shorter than ten characters.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        let candidate = match Url::parse(raw) {
            Ok(url) => id_from_url(&url)?,
            // Links pasted without a scheme.
            Err(_) if raw.contains('/') => {
                let url = Url::parse(&format!("https://{raw}")).ok()?;
                id_from_url(&url)?
            }
            Err(_) => raw.to_owned(),
        };

        FOLDER_ID_RE
            .is_match(&candidate)
            .then_some(Self(candidate))
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FolderRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn id_from_url(url: &Url) -> Option<String> {
    if let Some(segments) = url.path_segments() {
        let mut segments = segments.skip_while(|s| *s != "folders");
        if segments.next().is_some() {
            return segments.next().filter(|s| !s.is_empty()).map(str::to_owned);
        }
    }
    url.query_pairs()
        .find(|(k, _)| k == "id")
        .map(|(_, v)| v.into_owned())
}
