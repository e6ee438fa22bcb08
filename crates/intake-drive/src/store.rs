use async_trait::async_trait;
use intake_core::UploadedFile;

use crate::error::DriveError;

/// A folder in the remote store, addressed by id with a human-facing link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFolder {
    pub id: String,
    pub url: String,
}

/// Metadata for one object in the remote store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFile {
    pub id: String,
    pub name: String,
    pub mime_type: Option<String>,
    pub web_view_link: Option<String>,
    pub web_content_link: Option<String>,
}

/// Capabilities the upload pipeline needs from a hierarchical remote store.
///
/// Implementations propagate every network or auth failure and never retry.
/// `create_folder` does not deduplicate by name.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn create_folder(
        &self,
        name: &str,
        parent_id: Option<&str>,
    ) -> Result<RemoteFolder, DriveError>;

    async fn upload_file(
        &self,
        name: &str,
        mime_type: &str,
        bytes: Vec<u8>,
        parent_id: &str,
    ) -> Result<UploadedFile, DriveError>;

    /// Lists at most `limit` non-trashed children of `folder_id`.
    async fn list_files(&self, folder_id: &str, limit: u32) -> Result<Vec<RemoteFile>, DriveError>;

    /// Returns `None` when the object does not exist or was trashed.
    async fn get_by_id(&self, id: &str) -> Result<Option<RemoteFile>, DriveError>;

    /// Grants anonymous read access.
    async fn set_public(&self, id: &str) -> Result<(), DriveError>;

    async fn find_folder_by_name(
        &self,
        name: &str,
        parent_id: Option<&str>,
    ) -> Result<Option<RemoteFolder>, DriveError>;
}
