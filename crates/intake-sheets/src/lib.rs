//! Spreadsheet sync: one row per product, keyed by product id in column A.

pub mod client;
pub mod error;
pub mod range;
pub mod row;

mod types;

pub use client::{SheetsClient, UpsertAction};
pub use error::SheetsError;
pub use range::{column_letter, row_range};
pub use row::ProductRow;
