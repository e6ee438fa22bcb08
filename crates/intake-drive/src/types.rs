//! Wire types for the Drive v3 JSON responses.

use serde::{Deserialize, Serialize};

pub(crate) const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FileResource {
    pub id: Option<String>,
    pub name: Option<String>,
    pub mime_type: Option<String>,
    pub web_view_link: Option<String>,
    pub web_content_link: Option<String>,
    #[serde(default)]
    pub trashed: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FileList {
    #[serde(default)]
    pub files: Vec<FileResource>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FileMetadata<'a> {
    pub name: &'a str,
    pub mime_type: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parents: Vec<&'a str>,
}

#[derive(Debug, Serialize)]
pub(crate) struct PermissionRequest {
    pub role: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
}
