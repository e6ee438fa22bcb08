//! Process-lifetime memo of the shared root folder id.
//!
//! The root folder is looked up by name and created when missing. Losing the
//! cached id only costs another lookup; [`RootFolderCache::invalidate`] drops
//! it when the remote folder turns out to be gone.

use tokio::sync::Mutex;

use crate::error::DriveError;
use crate::store::ObjectStore;

pub struct RootFolderCache {
    name: String,
    cached: Mutex<Option<String>>,
}

impl RootFolderCache {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            cached: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the root folder id, resolving it on a cache miss.
    ///
    /// # Errors
    ///
    /// Propagates any [`DriveError`] from the lookup or the creation.
    pub async fn resolve(&self, store: &dyn ObjectStore) -> Result<String, DriveError> {
        let mut cached = self.cached.lock().await;
        if let Some(id) = cached.as_ref() {
            return Ok(id.clone());
        }

        let id = match store.find_folder_by_name(&self.name, None).await? {
            Some(folder) => {
                tracing::debug!(folder_id = %folder.id, name = %self.name, "found root folder");
                folder.id
            }
            None => {
                let folder = store.create_folder(&self.name, None).await?;
                tracing::info!(folder_id = %folder.id, name = %self.name, "created root folder");
                folder.id
            }
        };

        *cached = Some(id.clone());
        Ok(id)
    }

    pub async fn invalidate(&self) {
        self.cached.lock().await.take();
    }
}
