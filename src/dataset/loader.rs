//! One-shot reader for the SQLite sales export.
//!
//! The export is opened read-only, validated, joined into transaction records
//! and closed again. Nothing is read from it after startup.

use super::context::DatasetContext;
use super::error::DatasetError;
use super::keys;
use super::models::{LookupTable, Lookups, TransactionRecord};
use super::schema::{
    ARTISTS_TABLE, ARTIST_KEYS_TABLE, GENRES_TABLE, GENRE_KEYS_TABLE, REQUIRED_TABLES,
    TRANSACTIONS_QUERY,
};
use crate::sqlite_persistence::Table;
use chrono::NaiveDate;
use rusqlite::{Connection, OpenFlags};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Label used for a missing billing country.
pub const UNKNOWN_COUNTRY: &str = "Unknown";

/// A joined row as SQLite hands it back, before any parsing.
struct RawTransactionRow {
    line_id: i64,
    invoice_id: i64,
    track_id: i64,
    unit_price: String,
    quantity: i64,
    invoice_date: Option<String>,
    billing_country: Option<String>,
    genre_name: Option<String>,
    artist_name: Option<String>,
}

impl RawTransactionRow {
    fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(RawTransactionRow {
            line_id: row.get(0)?,
            invoice_id: row.get(1)?,
            track_id: row.get(2)?,
            unit_price: row.get(3)?,
            quantity: row.get(4)?,
            invoice_date: row.get(5)?,
            billing_country: row.get(6)?,
            genre_name: row.get(7)?,
            artist_name: row.get(8)?,
        })
    }
}

impl TryFrom<RawTransactionRow> for TransactionRecord {
    type Error = DatasetError;

    fn try_from(raw: RawTransactionRow) -> Result<Self, Self::Error> {
        let date_str = raw.invoice_date.ok_or(DatasetError::MissingInvoice {
            line_id: raw.line_id,
            invoice_id: raw.invoice_id,
        })?;
        let invoice_date =
            parse_invoice_date(&date_str).ok_or_else(|| DatasetError::InvalidDate {
                line_id: raw.line_id,
                value: date_str.clone(),
            })?;

        let unit_price =
            Decimal::from_str(raw.unit_price.trim()).map_err(|_| DatasetError::InvalidPrice {
                line_id: raw.line_id,
                value: raw.unit_price.clone(),
            })?;

        let quantity = u32::try_from(raw.quantity)
            .ok()
            .filter(|q| *q >= 1)
            .ok_or(DatasetError::InvalidQuantity {
                line_id: raw.line_id,
                value: raw.quantity,
            })?;

        Ok(TransactionRecord {
            line_id: raw.line_id,
            invoice_id: raw.invoice_id,
            track_id: raw.track_id,
            unit_price,
            quantity,
            invoice_date,
            billing_country: raw
                .billing_country
                .unwrap_or_else(|| UNKNOWN_COUNTRY.to_string()),
            genre_name: raw.genre_name,
            artist_name: raw.artist_name,
        })
    }
}

/// Accepts `YYYY-MM-DD` optionally followed by a time part, which is dropped.
fn parse_invoice_date(value: &str) -> Option<NaiveDate> {
    let date_part = value.trim().get(..10)?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Loads the whole dataset from the SQLite export at `db_path`.
pub fn load_dataset<P: AsRef<Path>>(db_path: P) -> Result<DatasetContext, DatasetError> {
    let db_path = db_path.as_ref();
    if !db_path.is_file() {
        return Err(DatasetError::MissingFile(db_path.to_path_buf()));
    }

    let start = Instant::now();
    let conn = Connection::open_with_flags(
        db_path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_URI | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;

    let context = load_from_connection(&conn)?;
    info!(
        "Loaded {} line items, {} genres, {} artists from {:?} in {}ms",
        context.len(),
        context.lookups().genres.len(),
        context.lookups().artists.len(),
        db_path,
        start.elapsed().as_millis()
    );
    Ok(context)
}

/// Loads the dataset from an already open connection.
pub fn load_from_connection(conn: &Connection) -> Result<DatasetContext, DatasetError> {
    #[cfg(not(feature = "no_checks"))]
    for table in REQUIRED_TABLES {
        table.validate(conn)?;
    }
    #[cfg(feature = "no_checks")]
    debug!(
        "Skipping validation of {} dataset tables",
        REQUIRED_TABLES.len()
    );

    let records = load_transactions(conn)?;
    let lookups = Lookups {
        genres: load_lookup(conn, &GENRE_KEYS_TABLE, &GENRES_TABLE, keys::genre_key)?,
        artists: load_lookup(conn, &ARTIST_KEYS_TABLE, &ARTISTS_TABLE, keys::artist_key)?,
    };

    DatasetContext::new(records, lookups)
}

fn load_transactions(conn: &Connection) -> Result<Vec<TransactionRecord>, DatasetError> {
    let mut stmt = conn.prepare(TRANSACTIONS_QUERY)?;
    let raw_rows = stmt
        .query_map([], RawTransactionRow::from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    let records = raw_rows
        .into_iter()
        .map(TransactionRecord::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    let unlinked = records
        .iter()
        .filter(|r| r.genre_name.is_none() || r.artist_name.is_none())
        .count();
    if unlinked > 0 {
        warn!(
            "{} line items have no genre or artist linkage, keeping them with empty names",
            unlinked
        );
    }
    Ok(records)
}

/// Reads a key -> name lookup table. When the export does not ship it, keys
/// are derived from the entity table rows with `derive_key`.
fn load_lookup(
    conn: &Connection,
    lookup_table: &Table,
    entity_table: &Table,
    derive_key: fn(i64, &str) -> String,
) -> Result<LookupTable, DatasetError> {
    let table = if lookup_table.exists(conn)? {
        lookup_table.validate(conn)?;
        let mut stmt = conn.prepare(&format!("SELECT key, name FROM {}", lookup_table.name))?;
        let table = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?
            .collect::<Result<LookupTable, _>>()?;
        debug!("Read {} lookup entries from '{}'", table.len(), lookup_table.name);
        table
    } else {
        let id_column = entity_table.columns[0].name;
        let mut stmt = conn.prepare(&format!(
            "SELECT {}, Name FROM {} WHERE Name IS NOT NULL",
            id_column, entity_table.name
        ))?;
        let table = stmt
            .query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))?
            .map(|row| row.map(|(id, name)| (derive_key(id, &name), name)))
            .collect::<Result<LookupTable, _>>()?;
        info!(
            "No '{}' table in dataset, derived {} keys from '{}'",
            lookup_table.name,
            table.len(),
            entity_table.name
        );
        table
    };
    Ok(table)
}
