use serde::{Deserialize, Serialize};

/// `ValueRange` as read from `spreadsheets.values.get`.
#[derive(Debug, Deserialize)]
pub(crate) struct ValueRangeResponse {
    #[serde(default)]
    pub values: Vec<Vec<String>>,
}

/// `ValueRange` body for update and append.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ValueRangeBody<'a> {
    pub range: &'a str,
    pub major_dimension: &'static str,
    pub values: Vec<&'a [String]>,
}
