use chrono::{DateTime, SecondsFormat, Utc};
use intake_core::{ProductUploadRequest, UploadOutcome};

/// Cell values written for one product.
///
/// Columns: product id, name, sku, folder url, uploaded image count,
/// newline-joined view links, sync timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRow {
    cells: Vec<String>,
}

impl ProductRow {
    pub const WIDTH: usize = 7;

    #[must_use]
    pub fn from_outcome(
        product: &ProductUploadRequest,
        outcome: &UploadOutcome,
        synced_at: DateTime<Utc>,
    ) -> Self {
        let links = outcome
            .uploaded_files
            .iter()
            .filter_map(|f| f.web_view_link.as_deref())
            .collect::<Vec<_>>()
            .join("\n");

        Self {
            cells: vec![
                product.id.clone(),
                product.name.clone(),
                product.sku.clone().unwrap_or_default(),
                outcome.folder_url.clone(),
                outcome.uploaded_files.len().to_string(),
                links,
                synced_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            ],
        }
    }

    /// Key the row is matched on.
    #[must_use]
    pub fn product_id(&self) -> &str {
        &self.cells[0]
    }

    #[must_use]
    pub fn cells(&self) -> &[String] {
        &self.cells
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use intake_core::UploadedFile;

    use super::*;

    fn product() -> ProductUploadRequest {
        ProductUploadRequest {
            id: "prod-1".to_owned(),
            name: "Blue Mug".to_owned(),
            sku: None,
            existing_remote_folder_ref: None,
            images: Vec::new(),
        }
    }

    fn file(id: &str, link: Option<&str>) -> UploadedFile {
        UploadedFile {
            id: id.to_owned(),
            name: format!("{id}.jpg"),
            web_view_link: link.map(str::to_owned),
            web_content_link: None,
        }
    }

    #[test]
    fn from_outcome_fills_every_column() {
        let outcome = UploadOutcome {
            folder_id: "folder-1".to_owned(),
            folder_url: "https://drive.google.com/drive/folders/folder-1".to_owned(),
            folder_reused: false,
            uploaded_files: vec![
                file("a", Some("https://drive.google.com/file/d/a/view")),
                file("b", None),
                file("c", Some("https://drive.google.com/file/d/c/view")),
            ],
            failed_images: Vec::new(),
            skipped_images: Vec::new(),
        };
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 30, 0).unwrap();

        let row = ProductRow::from_outcome(&product(), &outcome, at);

        assert_eq!(row.cells().len(), ProductRow::WIDTH);
        assert_eq!(row.product_id(), "prod-1");
        assert_eq!(row.cells()[2], "");
        assert_eq!(row.cells()[4], "3");
        assert_eq!(
            row.cells()[5],
            "https://drive.google.com/file/d/a/view\nhttps://drive.google.com/file/d/c/view"
        );
        assert_eq!(row.cells()[6], "2026-03-01T12:30:00Z");
    }
}
