//! Table descriptors for the media store export.
//!
//! Only the columns the transaction join reads are declared. A full export
//! carries many more (customers, employees, playlists...) which are ignored.

use crate::sqlite_column;
use crate::sqlite_persistence::{SqlType, Table};

pub const INVOICE_ITEMS_TABLE: Table = Table {
    name: "invoice_items",
    columns: &[
        sqlite_column!("InvoiceLineId", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("InvoiceId", &SqlType::Integer, non_null = true),
        sqlite_column!("TrackId", &SqlType::Integer, non_null = true),
        sqlite_column!("UnitPrice", &SqlType::Numeric, non_null = true),
        sqlite_column!("Quantity", &SqlType::Integer, non_null = true),
    ],
};

pub const INVOICES_TABLE: Table = Table {
    name: "invoices",
    columns: &[
        sqlite_column!("InvoiceId", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("InvoiceDate", &SqlType::Text, non_null = true), // 'YYYY-MM-DD HH:MM:SS'
        sqlite_column!("BillingCountry", &SqlType::Text),
    ],
};

pub const TRACKS_TABLE: Table = Table {
    name: "tracks",
    columns: &[
        sqlite_column!("TrackId", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("Name", &SqlType::Text, non_null = true),
        sqlite_column!("AlbumId", &SqlType::Integer),
        sqlite_column!("GenreId", &SqlType::Integer),
    ],
};

pub const GENRES_TABLE: Table = Table {
    name: "genres",
    columns: &[
        sqlite_column!("GenreId", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("Name", &SqlType::Text),
    ],
};

pub const ALBUMS_TABLE: Table = Table {
    name: "albums",
    columns: &[
        sqlite_column!("AlbumId", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("Title", &SqlType::Text, non_null = true),
        sqlite_column!("ArtistId", &SqlType::Integer, non_null = true),
    ],
};

pub const ARTISTS_TABLE: Table = Table {
    name: "artists",
    columns: &[
        sqlite_column!("ArtistId", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("Name", &SqlType::Text),
    ],
};

/// Genre control key -> display name. Optional, see the loader fallback.
pub const GENRE_KEYS_TABLE: Table = Table {
    name: "genre_keys",
    columns: &[
        sqlite_column!("key", &SqlType::Text, is_primary_key = true),
        sqlite_column!("name", &SqlType::Text, non_null = true),
    ],
};

/// Artist control key -> display name. Optional, see the loader fallback.
pub const ARTIST_KEYS_TABLE: Table = Table {
    name: "artist_keys",
    columns: &[
        sqlite_column!("key", &SqlType::Text, is_primary_key = true),
        sqlite_column!("name", &SqlType::Text, non_null = true),
    ],
};

/// Tables that must exist for the dataset to load.
pub const REQUIRED_TABLES: &[Table] = &[
    INVOICE_ITEMS_TABLE,
    INVOICES_TABLE,
    TRACKS_TABLE,
    GENRES_TABLE,
    ALBUMS_TABLE,
    ARTISTS_TABLE,
];

/// Line items left-joined down to artist names. Linkage gaps yield NULL names
/// rather than dropping the line item.
pub const TRANSACTIONS_QUERY: &str = "SELECT
    ivi.InvoiceLineId, ivi.InvoiceId, ivi.TrackId,
    CAST(ivi.UnitPrice AS TEXT), ivi.Quantity,
    iv.InvoiceDate, iv.BillingCountry,
    genres.Name AS GenreName,
    artists.Name AS ArtistName
FROM invoice_items AS ivi
LEFT JOIN invoices AS iv ON ivi.InvoiceId = iv.InvoiceId
LEFT JOIN tracks AS tr ON ivi.TrackId = tr.TrackId
LEFT JOIN genres ON tr.GenreId = genres.GenreId
LEFT JOIN albums ON tr.AlbumId = albums.AlbumId
LEFT JOIN artists ON albums.ArtistId = artists.ArtistId
ORDER BY ivi.InvoiceLineId";
