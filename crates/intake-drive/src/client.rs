//! HTTP client for the Google Drive v3 REST API.
//!
//! Authenticates with a ready bearer token; token refresh happens elsewhere.
//! Uploads use the resumable protocol: an initiating `POST` carrying the
//! JSON metadata, then a single `PUT` of the bytes to the session URL the
//! server returns in `Location`.

use std::time::Duration;

use async_trait::async_trait;
use intake_core::UploadedFile;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::Client;

use crate::error::DriveError;
use crate::http::{ensure_success, normalise_base, read_json};
use crate::store::{ObjectStore, RemoteFile, RemoteFolder};
use crate::types::{FileList, FileMetadata, FileResource, PermissionRequest, FOLDER_MIME_TYPE};

const DEFAULT_API_BASE: &str = "https://www.googleapis.com/drive/v3";
const DEFAULT_UPLOAD_BASE: &str = "https://www.googleapis.com/upload/drive/v3";

/// Largest page the Drive `files.list` endpoint honours.
const MAX_PAGE_SIZE: u32 = 1000;

/// Drive ids are `[A-Za-z0-9_-]`; everything else is escaped in path segments.
const ID_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_');

const FILE_FIELDS: &str = "id,name,mimeType,webViewLink,webContentLink";

/// Client for the Drive v3 REST API.
///
/// Use [`DriveClient::new`] for production or [`DriveClient::with_base_urls`]
/// to point at a mock server in tests.
pub struct DriveClient {
    client: Client,
    access_token: String,
    api_base: String,
    upload_base: String,
}

impl DriveClient {
    /// Creates a client pointed at the production Drive endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`DriveError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(access_token: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, DriveError> {
        Self::with_base_urls(
            access_token,
            timeout_secs,
            user_agent,
            DEFAULT_API_BASE,
            DEFAULT_UPLOAD_BASE,
        )
    }

    /// Creates a client with custom API and upload base URLs.
    ///
    /// # Errors
    ///
    /// Returns [`DriveError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`DriveError::InvalidBaseUrl`] if either base URL does not parse.
    pub fn with_base_urls(
        access_token: &str,
        timeout_secs: u64,
        user_agent: &str,
        api_base: &str,
        upload_base: &str,
    ) -> Result<Self, DriveError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            access_token: access_token.to_owned(),
            api_base: normalise_base(api_base)?,
            upload_base: normalise_base(upload_base)?,
        })
    }

    fn files_url(&self) -> String {
        format!("{}/files", self.api_base)
    }

    fn file_url(&self, id: &str) -> String {
        format!(
            "{}/files/{}",
            self.api_base,
            utf8_percent_encode(id, ID_SEGMENT)
        )
    }

    /// Runs one `files.list` query, following page tokens until `limit`
    /// results are collected or the listing is exhausted.
    async fn query_files(&self, q: &str, limit: u32) -> Result<Vec<RemoteFile>, DriveError> {
        let url = self.files_url();
        let fields = format!("nextPageToken,files({FILE_FIELDS})");
        let mut collected = Vec::new();
        let mut page_token: Option<String> = None;

        while collected.len() < limit as usize {
            let remaining = limit - u32::try_from(collected.len()).unwrap_or(limit);
            let page_size = remaining.min(MAX_PAGE_SIZE).to_string();
            let mut params = vec![
                ("q", q),
                ("pageSize", page_size.as_str()),
                ("fields", fields.as_str()),
                ("supportsAllDrives", "true"),
                ("includeItemsFromAllDrives", "true"),
            ];
            if let Some(token) = page_token.as_deref() {
                params.push(("pageToken", token));
            }

            let response = self
                .client
                .get(&url)
                .bearer_auth(&self.access_token)
                .query(&params)
                .send()
                .await?;
            let response = ensure_success(response, &url).await?;
            let page: FileList = read_json(response, "files.list").await?;

            collected.extend(
                page.files
                    .into_iter()
                    .filter_map(|f| into_remote_file(f, "files.list").ok()),
            );

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        collected.truncate(limit as usize);
        Ok(collected)
    }
}

#[async_trait]
impl ObjectStore for DriveClient {
    async fn create_folder(
        &self,
        name: &str,
        parent_id: Option<&str>,
    ) -> Result<RemoteFolder, DriveError> {
        let url = self.files_url();
        let metadata = FileMetadata {
            name,
            mime_type: FOLDER_MIME_TYPE,
            parents: parent_id.into_iter().collect(),
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .query(&[("fields", "id,webViewLink"), ("supportsAllDrives", "true")])
            .json(&metadata)
            .send()
            .await?;
        let response = ensure_success(response, &url).await?;
        let created: FileResource = read_json(response, "files.create(folder)").await?;

        let id = created.id.ok_or_else(|| DriveError::MissingField {
            context: format!("files.create(folder={name})"),
            field: "id",
        })?;
        let url = created
            .web_view_link
            .unwrap_or_else(|| folder_link(&id));

        tracing::info!(folder_id = %id, folder_name = name, "created drive folder");
        Ok(RemoteFolder { id, url })
    }

    async fn upload_file(
        &self,
        name: &str,
        mime_type: &str,
        bytes: Vec<u8>,
        parent_id: &str,
    ) -> Result<UploadedFile, DriveError> {
        let init_url = format!("{}/files", self.upload_base);
        let metadata = FileMetadata {
            name,
            mime_type,
            parents: vec![parent_id],
        };

        let init = self
            .client
            .post(&init_url)
            .bearer_auth(&self.access_token)
            .query(&[
                ("uploadType", "resumable"),
                ("supportsAllDrives", "true"),
                ("fields", FILE_FIELDS),
            ])
            .header("X-Upload-Content-Type", mime_type)
            .header("X-Upload-Content-Length", bytes.len().to_string())
            .json(&metadata)
            .send()
            .await?;
        let init = ensure_success(init, &init_url).await?;

        let session_url = init
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
            .ok_or_else(|| DriveError::MissingField {
                context: format!("resumable upload init for {name}"),
                field: "Location",
            })?;

        tracing::debug!(file_name = name, size = bytes.len(), "uploading bytes to resumable session");

        let response = self
            .client
            .put(&session_url)
            .bearer_auth(&self.access_token)
            .header(reqwest::header::CONTENT_TYPE, mime_type)
            .body(bytes)
            .send()
            .await?;
        let response = ensure_success(response, &session_url).await?;
        let created: FileResource = read_json(response, "files.create(upload)").await?;

        let file = into_remote_file(created, "files.create(upload)")?;
        Ok(UploadedFile {
            id: file.id,
            name: file.name,
            web_view_link: file.web_view_link,
            web_content_link: file.web_content_link,
        })
    }

    async fn list_files(&self, folder_id: &str, limit: u32) -> Result<Vec<RemoteFile>, DriveError> {
        let q = format!("'{}' in parents and trashed = false", escape_query(folder_id));
        self.query_files(&q, limit).await
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<RemoteFile>, DriveError> {
        let url = self.file_url(id);
        let fields = format!("{FILE_FIELDS},trashed");
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(&[("fields", fields.as_str()), ("supportsAllDrives", "true")])
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = ensure_success(response, &url).await?;
        let resource: FileResource = read_json(response, "files.get").await?;
        if resource.trashed {
            return Ok(None);
        }
        into_remote_file(resource, "files.get").map(Some)
    }

    async fn set_public(&self, id: &str) -> Result<(), DriveError> {
        let url = format!("{}/permissions", self.file_url(id));
        let body = PermissionRequest {
            role: "reader",
            kind: "anyone",
        };
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .query(&[("supportsAllDrives", "true")])
            .json(&body)
            .send()
            .await?;
        ensure_success(response, &url).await?;
        Ok(())
    }

    async fn find_folder_by_name(
        &self,
        name: &str,
        parent_id: Option<&str>,
    ) -> Result<Option<RemoteFolder>, DriveError> {
        let mut q = format!(
            "name = '{}' and mimeType = '{FOLDER_MIME_TYPE}' and trashed = false",
            escape_query(name)
        );
        if let Some(parent) = parent_id {
            q.push_str(&format!(" and '{}' in parents", escape_query(parent)));
        }

        let found = self.query_files(&q, 1).await?;
        Ok(found.into_iter().next().map(|f| RemoteFolder {
            url: f.web_view_link.unwrap_or_else(|| folder_link(&f.id)),
            id: f.id,
        }))
    }
}

/// Browser link for a folder id, used when the API omits `webViewLink`.
#[must_use]
pub fn folder_link(id: &str) -> String {
    format!("https://drive.google.com/drive/folders/{id}")
}

/// Escapes a literal for use inside a single-quoted Drive query string.
fn escape_query(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

fn into_remote_file(resource: FileResource, context: &str) -> Result<RemoteFile, DriveError> {
    let id = resource.id.ok_or_else(|| DriveError::MissingField {
        context: context.to_owned(),
        field: "id",
    })?;
    Ok(RemoteFile {
        id,
        name: resource.name.unwrap_or_default(),
        mime_type: resource.mime_type,
        web_view_link: resource.web_view_link,
        web_content_link: resource.web_content_link,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_query_handles_quotes_and_backslashes() {
        assert_eq!(escape_query("Kid's Mug"), "Kid\\'s Mug");
        assert_eq!(escape_query(r"a\b"), r"a\\b");
    }

    #[test]
    fn with_base_urls_rejects_garbage() {
        let result = DriveClient::with_base_urls("t", 5, "ua", "not a url", "https://up.example.com");
        assert!(matches!(result, Err(DriveError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn file_url_encodes_id() {
        let client = DriveClient::with_base_urls(
            "token",
            5,
            "intake-test/0.1",
            "https://api.example.com/drive/v3",
            "https://api.example.com/upload/drive/v3",
        )
        .expect("client construction should not fail");
        assert_eq!(
            client.file_url("abc/def"),
            "https://api.example.com/drive/v3/files/abc%2Fdef"
        );
        assert_eq!(
            client.file_url("1AbC_d-E"),
            "https://api.example.com/drive/v3/files/1AbC_d-E"
        );
    }

    #[test]
    fn folder_link_uses_drive_folder_path() {
        assert_eq!(
            folder_link("xyz"),
            "https://drive.google.com/drive/folders/xyz"
        );
    }
}
