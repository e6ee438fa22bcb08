//! In-memory `ObjectStore` and fixtures shared by the pipeline tests.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use intake_core::{ImageDescriptor, ProductUploadRequest, UploadedFile};
use intake_drive::{DriveError, ObjectStore, RemoteFile, RemoteFolder};
use intake_pipeline::ImageFetcher;

#[derive(Debug, Clone)]
pub struct StoredObject {
    pub id: String,
    pub name: String,
    pub parent: Option<String>,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Default)]
struct State {
    next_id: u64,
    objects: Vec<StoredObject>,
    public: HashSet<String>,
}

/// Append-only store that mimics the remote folder semantics.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
    pub fail_create_folder: bool,
    pub fail_set_public: bool,
    /// Uploads whose file name starts with this prefix are rejected.
    pub fail_upload_prefix: Option<String>,
}

const FOLDER_MIME: &str = "application/vnd.google-apps.folder";

impl MemoryStore {
    pub fn failing_create_folder() -> Self {
        Self {
            fail_create_folder: true,
            ..Self::default()
        }
    }

    pub fn failing_set_public() -> Self {
        Self {
            fail_set_public: true,
            ..Self::default()
        }
    }

    pub fn failing_uploads_starting_with(prefix: &str) -> Self {
        Self {
            fail_upload_prefix: Some(prefix.to_owned()),
            ..Self::default()
        }
    }

    fn insert(&self, name: &str, parent: Option<&str>, mime_type: &str, bytes: Vec<u8>) -> String {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let id = if mime_type == FOLDER_MIME {
            format!("folder-{:010}", state.next_id)
        } else {
            format!("file-{:010}", state.next_id)
        };
        state.objects.push(StoredObject {
            id: id.clone(),
            name: name.to_owned(),
            parent: parent.map(str::to_owned),
            mime_type: mime_type.to_owned(),
            bytes,
        });
        id
    }

    pub fn seed_folder(&self, name: &str) -> String {
        self.insert(name, None, FOLDER_MIME, Vec::new())
    }

    pub fn seed_file(&self, folder_id: &str, name: &str) -> String {
        self.insert(name, Some(folder_id), "image/jpeg", vec![0xFF])
    }

    pub fn delete(&self, id: &str) {
        self.state.lock().unwrap().objects.retain(|o| o.id != id);
    }

    pub fn folders(&self) -> Vec<StoredObject> {
        self.state
            .lock()
            .unwrap()
            .objects
            .iter()
            .filter(|o| o.mime_type == FOLDER_MIME)
            .cloned()
            .collect()
    }

    pub fn files_in(&self, folder_id: &str) -> Vec<StoredObject> {
        self.state
            .lock()
            .unwrap()
            .objects
            .iter()
            .filter(|o| o.parent.as_deref() == Some(folder_id) && o.mime_type != FOLDER_MIME)
            .cloned()
            .collect()
    }

    pub fn is_public(&self, id: &str) -> bool {
        self.state.lock().unwrap().public.contains(id)
    }

    fn find(&self, id: &str) -> Option<StoredObject> {
        self.state
            .lock()
            .unwrap()
            .objects
            .iter()
            .find(|o| o.id == id)
            .cloned()
    }
}

fn folder_url(id: &str) -> String {
    format!("https://drive.google.com/drive/folders/{id}")
}

fn not_found(id: &str) -> DriveError {
    DriveError::UnexpectedStatus {
        status: 404,
        url: format!("memory://{id}"),
        body: "not found".to_owned(),
    }
}

fn to_remote(o: &StoredObject) -> RemoteFile {
    RemoteFile {
        id: o.id.clone(),
        name: o.name.clone(),
        mime_type: Some(o.mime_type.clone()),
        web_view_link: Some(if o.mime_type == FOLDER_MIME {
            folder_url(&o.id)
        } else {
            format!("https://drive.google.com/file/d/{}/view", o.id)
        }),
        web_content_link: None,
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn create_folder(
        &self,
        name: &str,
        parent_id: Option<&str>,
    ) -> Result<RemoteFolder, DriveError> {
        if self.fail_create_folder {
            return Err(DriveError::UnexpectedStatus {
                status: 403,
                url: "memory://files".to_owned(),
                body: "insufficient permissions".to_owned(),
            });
        }
        if let Some(parent) = parent_id {
            if self.find(parent).is_none() {
                return Err(not_found(parent));
            }
        }
        let id = self.insert(name, parent_id, FOLDER_MIME, Vec::new());
        Ok(RemoteFolder {
            url: folder_url(&id),
            id,
        })
    }

    async fn upload_file(
        &self,
        name: &str,
        mime_type: &str,
        bytes: Vec<u8>,
        parent_id: &str,
    ) -> Result<UploadedFile, DriveError> {
        if let Some(prefix) = &self.fail_upload_prefix {
            if name.starts_with(prefix.as_str()) {
                return Err(DriveError::UnexpectedStatus {
                    status: 503,
                    url: "memory://upload".to_owned(),
                    body: "backend error".to_owned(),
                });
            }
        }
        let id = self.insert(name, Some(parent_id), mime_type, bytes);
        Ok(UploadedFile {
            web_view_link: Some(format!("https://drive.google.com/file/d/{id}/view")),
            web_content_link: Some(format!("https://drive.google.com/uc?id={id}")),
            name: name.to_owned(),
            id,
        })
    }

    async fn list_files(&self, folder_id: &str, limit: u32) -> Result<Vec<RemoteFile>, DriveError> {
        Ok(self
            .files_in(folder_id)
            .iter()
            .take(limit as usize)
            .map(to_remote)
            .collect())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<RemoteFile>, DriveError> {
        Ok(self.find(id).as_ref().map(to_remote))
    }

    async fn set_public(&self, id: &str) -> Result<(), DriveError> {
        if self.fail_set_public {
            return Err(DriveError::UnexpectedStatus {
                status: 403,
                url: format!("memory://{id}/permissions"),
                body: "sharing disabled".to_owned(),
            });
        }
        self.state.lock().unwrap().public.insert(id.to_owned());
        Ok(())
    }

    async fn find_folder_by_name(
        &self,
        name: &str,
        parent_id: Option<&str>,
    ) -> Result<Option<RemoteFolder>, DriveError> {
        Ok(self
            .folders()
            .into_iter()
            .find(|f| f.name == name && f.parent.as_deref() == parent_id)
            .map(|f| RemoteFolder {
                url: folder_url(&f.id),
                id: f.id,
            }))
    }
}

/// Fetcher with three attempts and no delay between them.
pub fn test_fetcher() -> ImageFetcher {
    ImageFetcher::new(5, "intake-test/0.1", 3, 0).expect("fetcher construction should not fail")
}

pub fn image(id: &str, primary: Option<&str>, fallback: Option<&str>, sort_order: i32) -> ImageDescriptor {
    ImageDescriptor {
        id: id.to_owned(),
        primary_source_url: primary.map(str::to_owned),
        fallback_source_url: fallback.map(str::to_owned),
        filename: format!("{id}.jpg"),
        sort_order,
    }
}

pub fn product(images: Vec<ImageDescriptor>) -> ProductUploadRequest {
    ProductUploadRequest {
        id: "6f1c2e4a-0000-4000-8000-000000000001".to_owned(),
        name: "Blue Mug".to_owned(),
        sku: Some("MUG-01".to_owned()),
        existing_remote_folder_ref: None,
        images,
    }
}
