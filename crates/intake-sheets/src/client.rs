//! HTTP client for the Sheets v4 `spreadsheets.values` endpoints.
//!
//! Shares the drive bearer token. Rows are keyed by product id in column A;
//! the client never deletes or reorders rows.

use std::time::Duration;

use intake_core::SheetsConfig;
use intake_drive::http::{ensure_success, normalise_base, read_json};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::Client;

use crate::error::SheetsError;
use crate::range::{key_column_range, row_range, table_range};
use crate::row::ProductRow;
use crate::types::{ValueRangeBody, ValueRangeResponse};

/// A1 ranges keep `!` and `:` literal; quotes and spaces are escaped.
const RANGE_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'!')
    .remove(b':')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.');

/// What [`SheetsClient::upsert_product_row`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertAction {
    /// An existing row (1-based) was overwritten.
    Updated { row: usize },
    Appended,
}

pub struct SheetsClient {
    client: Client,
    access_token: String,
    api_base: String,
    spreadsheet_id: String,
    tab: String,
}

impl SheetsClient {
    /// Creates a client from the configured sheet settings.
    ///
    /// # Errors
    ///
    /// Same as [`SheetsClient::with_base_url`].
    pub fn from_config(
        access_token: &str,
        timeout_secs: u64,
        user_agent: &str,
        config: &SheetsConfig,
    ) -> Result<Self, SheetsError> {
        Self::with_base_url(
            access_token,
            timeout_secs,
            user_agent,
            &config.spreadsheet_id,
            &config.tab,
            &config.api_base,
        )
    }

    /// Creates a client against `api_base` (a wiremock server in tests).
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`SheetsError::InvalidBaseUrl`] if `api_base` does not parse.
    pub fn with_base_url(
        access_token: &str,
        timeout_secs: u64,
        user_agent: &str,
        spreadsheet_id: &str,
        tab: &str,
        api_base: &str,
    ) -> Result<Self, SheetsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            access_token: access_token.to_owned(),
            api_base: normalise_base(api_base)?,
            spreadsheet_id: spreadsheet_id.to_owned(),
            tab: tab.to_owned(),
        })
    }

    fn values_url(&self, range: &str) -> String {
        format!(
            "{}/spreadsheets/{}/values/{}",
            self.api_base,
            utf8_percent_encode(&self.spreadsheet_id, RANGE_SEGMENT),
            utf8_percent_encode(range, RANGE_SEGMENT)
        )
    }

    /// Writes `row` over the existing row for its product, or appends it.
    ///
    /// # Errors
    ///
    /// - [`SheetsError::Http`] on network failure.
    /// - [`SheetsError::UnexpectedStatus`] on a non-2xx response.
    /// - [`SheetsError::Deserialize`] if the key column cannot be parsed.
    pub async fn upsert_product_row(&self, row: &ProductRow) -> Result<UpsertAction, SheetsError> {
        if let Some(existing) = self.find_row(row.product_id()).await? {
            self.update_row(existing, row).await?;
            tracing::info!(
                product_id = row.product_id(),
                row = existing,
                tab = %self.tab,
                "updated product row"
            );
            return Ok(UpsertAction::Updated { row: existing });
        }

        self.append_row(row).await?;
        tracing::info!(
            product_id = row.product_id(),
            tab = %self.tab,
            "appended product row"
        );
        Ok(UpsertAction::Appended)
    }

    /// 1-based row whose column A equals `product_id`.
    async fn find_row(&self, product_id: &str) -> Result<Option<usize>, SheetsError> {
        let url = self.values_url(&key_column_range(&self.tab));
        tracing::debug!(url = %url, "reading product id column");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(&[("majorDimension", "ROWS")])
            .send()
            .await?;
        let response = ensure_success(response, &url).await?;
        let column: ValueRangeResponse = read_json(response, "values.get").await?;

        Ok(column
            .values
            .iter()
            .position(|cells| cells.first().is_some_and(|c| c.trim() == product_id))
            .map(|index| index + 1))
    }

    async fn update_row(&self, row_number: usize, row: &ProductRow) -> Result<(), SheetsError> {
        let range = row_range(&self.tab, row_number, ProductRow::WIDTH);
        let url = self.values_url(&range);
        let body = ValueRangeBody {
            range: &range,
            major_dimension: "ROWS",
            values: vec![row.cells()],
        };

        let response = self
            .client
            .put(&url)
            .bearer_auth(&self.access_token)
            .query(&[("valueInputOption", "RAW")])
            .json(&body)
            .send()
            .await?;
        ensure_success(response, &url).await?;
        Ok(())
    }

    async fn append_row(&self, row: &ProductRow) -> Result<(), SheetsError> {
        let range = table_range(&self.tab, ProductRow::WIDTH);
        let url = format!("{}:append", self.values_url(&range));
        let body = ValueRangeBody {
            range: &range,
            major_dimension: "ROWS",
            values: vec![row.cells()],
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .query(&[("valueInputOption", "RAW"), ("insertDataOption", "INSERT_ROWS")])
            .json(&body)
            .send()
            .await?;
        ensure_success(response, &url).await?;
        Ok(())
    }
}
