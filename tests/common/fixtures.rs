//! Test fixture creation for the sales dataset
//!
//! Builds a small Chinook-shaped SQLite file with the same table descriptors
//! the loader validates against.

use anyhow::Result;
use media_sales_dashboard::dataset::schema::{
    ARTIST_KEYS_TABLE, GENRE_KEYS_TABLE, REQUIRED_TABLES,
};
use rusqlite::Connection;
use std::path::PathBuf;
use tempfile::TempDir;

/// Genre rows as (id, name, control key). Keys match the stock genre keys.
const GENRES: &[(i64, &str, &str)] = &[
    (1, "Rock", "RK"),
    (2, "Jazz", "JZ"),
    (3, "Metal", "MT"),
    (4, "Blues", "BL"),
    (5, "Latin", "LT"),
];

/// Artist rows as (id, name, control key). Keys follow the `A<id>` scheme.
const ARTISTS: &[(i64, &str, &str)] = &[
    (1, "AC/DC", "A1"),
    (2, "Miles Davis", "A2"),
    (3, "Iron Maiden", "A3"),
    (4, "Gilberto Gil", "A4"),
];

/// Album rows as (id, title, artist id)
const ALBUMS: &[(i64, &str, i64)] = &[
    (1, "Back in Black", 1),
    (2, "Kind of Blue", 2),
    (3, "Powerslave", 3),
    (4, "Refazenda", 4),
];

/// Track rows as (id, name, album id, genre id)
const TRACKS: &[(i64, &str, i64, i64)] = &[
    (1, "Hells Bells", 1, 1),
    (2, "Shoot to Thrill", 1, 1),
    (3, "So What", 2, 2),
    (4, "Aces High", 3, 3),
    (5, "Refazenda", 4, 5),
    (6, "Blue in Green", 2, 4),
];

/// Invoice rows as (id, date, billing country)
const INVOICES: &[(i64, &str, &str)] = &[
    (1, "2009-01-03 00:00:00", "USA"),
    (2, "2010-02-10 00:00:00", "Canada"),
    (3, "2010-07-21 00:00:00", "Brazil"),
    (4, "2011-05-05 00:00:00", "USA"),
    (5, "2012-11-30 00:00:00", "Germany"),
    (6, "2013-12-22 00:00:00", "France"),
];

/// Line item rows as (id, invoice id, track id, unit price, quantity)
const INVOICE_ITEMS: &[(i64, i64, i64, f64, i64)] = &[
    (1, 1, 1, 0.99, 1),
    (2, 2, 1, 0.99, 1),
    (3, 2, 3, 0.99, 1),
    (4, 3, 5, 1.99, 1),
    (5, 4, 4, 0.99, 1),
    (6, 4, 2, 0.99, 1),
    (7, 5, 6, 0.99, 1),
    (8, 6, 3, 1.99, 1),
];

fn populate(conn: &Connection, with_key_tables: bool) -> Result<()> {
    for table in REQUIRED_TABLES {
        table.create(conn)?;
    }
    if with_key_tables {
        GENRE_KEYS_TABLE.create(conn)?;
        ARTIST_KEYS_TABLE.create(conn)?;
    }

    for (id, name, key) in GENRES {
        conn.execute(
            "INSERT INTO genres (GenreId, Name) VALUES (?1, ?2)",
            rusqlite::params![id, name],
        )?;
        if with_key_tables {
            conn.execute(
                "INSERT INTO genre_keys (key, name) VALUES (?1, ?2)",
                rusqlite::params![key, name],
            )?;
        }
    }
    for (id, name, key) in ARTISTS {
        conn.execute(
            "INSERT INTO artists (ArtistId, Name) VALUES (?1, ?2)",
            rusqlite::params![id, name],
        )?;
        if with_key_tables {
            conn.execute(
                "INSERT INTO artist_keys (key, name) VALUES (?1, ?2)",
                rusqlite::params![key, name],
            )?;
        }
    }
    for (id, title, artist_id) in ALBUMS {
        conn.execute(
            "INSERT INTO albums (AlbumId, Title, ArtistId) VALUES (?1, ?2, ?3)",
            rusqlite::params![id, title, artist_id],
        )?;
    }
    for (id, name, album_id, genre_id) in TRACKS {
        conn.execute(
            "INSERT INTO tracks (TrackId, Name, AlbumId, GenreId) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![id, name, album_id, genre_id],
        )?;
    }
    for (id, date, country) in INVOICES {
        conn.execute(
            "INSERT INTO invoices (InvoiceId, InvoiceDate, BillingCountry) VALUES (?1, ?2, ?3)",
            rusqlite::params![id, date, country],
        )?;
    }
    for (id, invoice_id, track_id, price, quantity) in INVOICE_ITEMS {
        conn.execute(
            "INSERT INTO invoice_items (InvoiceLineId, InvoiceId, TrackId, UnitPrice, Quantity)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![id, invoice_id, track_id, price, quantity],
        )?;
    }
    Ok(())
}

fn create_dataset(with_key_tables: bool) -> Result<(TempDir, PathBuf)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("chinook.db");
    let conn = Connection::open(&db_path)?;
    populate(&conn, with_key_tables)?;
    Ok((temp_dir, db_path))
}

/// Creates the fixture dataset in a fresh temp dir, lookup tables included.
///
/// The returned TempDir must be kept alive while the file is in use.
pub fn create_test_dataset() -> Result<(TempDir, PathBuf)> {
    create_dataset(true)
}

/// Same rows as [`create_test_dataset`] but without `genre_keys` and
/// `artist_keys`, like a stock export.
pub fn create_stock_test_dataset() -> Result<(TempDir, PathBuf)> {
    create_dataset(false)
}
