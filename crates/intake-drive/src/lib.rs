//! Remote object store access for product photo folders.
//!
//! [`ObjectStore`] is the capability surface the upload pipeline depends on.
//! [`DriveClient`] implements it against the Google Drive v3 REST API. None of
//! the operations retry internally; callers decide what is worth retrying.

pub mod client;
pub mod error;
pub mod folder_ref;
pub mod http;
pub mod root_folder;
pub mod store;

mod types;

pub use client::DriveClient;
pub use error::DriveError;
pub use folder_ref::FolderRef;
pub use root_folder::RootFolderCache;
pub use store::{ObjectStore, RemoteFile, RemoteFolder};
