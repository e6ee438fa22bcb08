use serde::{Deserialize, Serialize};

/// Snapshot of one product handed to the upload pipeline.
///
/// Read-only for the duration of a pipeline run; the pipeline never mutates
/// the descriptors it is given.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUploadRequest {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub sku: Option<String>,
    /// Link or id of a folder created by an earlier run, if any.
    #[serde(default)]
    pub existing_remote_folder_ref: Option<String>,
    #[serde(default)]
    pub images: Vec<ImageDescriptor>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageDescriptor {
    pub id: String,
    /// Preferred source, typically the processed version.
    #[serde(default)]
    pub primary_source_url: Option<String>,
    /// Original upload; tried when the primary is absent or fails.
    #[serde(default)]
    pub fallback_source_url: Option<String>,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub sort_order: i32,
}

impl ImageDescriptor {
    /// Primary URL with empty strings treated as absent.
    #[must_use]
    pub fn primary_url(&self) -> Option<&str> {
        non_empty(self.primary_source_url.as_deref())
    }

    /// Fallback URL with empty strings treated as absent.
    #[must_use]
    pub fn fallback_url(&self) -> Option<&str> {
        non_empty(self.fallback_source_url.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// A file that landed in the remote folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub id: String,
    pub name: String,
    pub web_view_link: Option<String>,
    pub web_content_link: Option<String>,
}

/// An input image that could not be uploaded, with the last failure reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedImage {
    pub image_id: String,
    pub filename: String,
    pub reason: String,
}

/// Result of one pipeline run.
///
/// `uploaded_files` only lists successes, in upload order. Failures and
/// skipped descriptors are reported separately so callers do not have to
/// diff against their own image list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadOutcome {
    pub folder_id: String,
    pub folder_url: String,
    pub folder_reused: bool,
    pub uploaded_files: Vec<UploadedFile>,
    #[serde(default)]
    pub failed_images: Vec<FailedImage>,
    /// Ids of descriptors that had no source URL at all.
    #[serde(default)]
    pub skipped_images: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_snapshot() {
        let raw = serde_json::json!({
            "id": "prod-1",
            "name": "Blue Mug",
            "sku": "MUG-01",
            "existingRemoteFolderRef": "https://drive.google.com/drive/folders/abc123DEF456",
            "images": [
                {
                    "id": "img-1",
                    "primarySourceUrl": "https://cdn.example.com/edited.png",
                    "fallbackSourceUrl": null,
                    "filename": "IMG_0001.HEIC",
                    "sortOrder": 2
                }
            ]
        });
        let product: ProductUploadRequest = serde_json::from_value(raw).unwrap();
        assert_eq!(product.sku.as_deref(), Some("MUG-01"));
        assert_eq!(product.images.len(), 1);
        assert_eq!(product.images[0].sort_order, 2);
        assert!(product.images[0].fallback_source_url.is_none());
    }

    #[test]
    fn missing_optional_fields_default() {
        let raw = serde_json::json!({ "id": "p", "name": "n" });
        let product: ProductUploadRequest = serde_json::from_value(raw).unwrap();
        assert!(product.sku.is_none());
        assert!(product.existing_remote_folder_ref.is_none());
        assert!(product.images.is_empty());
    }

    #[test]
    fn blank_urls_are_treated_as_absent() {
        let image = ImageDescriptor {
            id: "i".into(),
            primary_source_url: Some("   ".into()),
            fallback_source_url: Some(String::new()),
            filename: "a.jpg".into(),
            sort_order: 0,
        };
        assert_eq!(image.primary_url(), None);
        assert_eq!(image.fallback_url(), None);
    }

    #[test]
    fn outcome_serializes_camel_case() {
        let outcome = UploadOutcome {
            folder_id: "f".into(),
            folder_url: "u".into(),
            folder_reused: true,
            uploaded_files: vec![],
            failed_images: vec![],
            skipped_images: vec![],
        };
        let value = serde_json::to_value(&outcome).unwrap();
        assert_eq!(value["folderReused"], true);
        assert!(value.get("uploadedFiles").is_some());
    }
}
