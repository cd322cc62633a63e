use crate::sqlite_persistence::SchemaMismatch;
use std::path::PathBuf;
use thiserror::Error;

/// Reasons the dataset could not be loaded. All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("dataset file not found: {0:?}")]
    MissingFile(PathBuf),

    #[error("dataset schema mismatch: {0}")]
    Schema(#[from] SchemaMismatch),

    #[error("line item {line_id} references invoice {invoice_id} which does not exist")]
    MissingInvoice { line_id: i64, invoice_id: i64 },

    #[error("line item {line_id} has an unparseable invoice date '{value}'")]
    InvalidDate { line_id: i64, value: String },

    #[error("line item {line_id} has an unparseable unit price '{value}'")]
    InvalidPrice { line_id: i64, value: String },

    #[error("line item {line_id} has invalid quantity {value}, expected at least 1")]
    InvalidQuantity { line_id: i64, value: i64 },

    #[error("dataset contains no line items")]
    Empty,

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}
