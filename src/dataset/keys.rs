//! Control keys for exports that do not ship `genre_keys`/`artist_keys`.
//!
//! Genres of the stock media store export have fixed two-letter keys, the
//! ones the dashboard's default "Top" selection is written against. Anything
//! else is keyed by its entity id with a one-letter prefix.

/// Two-letter key of every genre in the stock export.
pub const STOCK_GENRE_KEYS: &[(&str, &str)] = &[
    ("RK", "Rock"),
    ("JZ", "Jazz"),
    ("MT", "Metal"),
    ("AP", "Alternative & Punk"),
    ("RR", "Rock And Roll"),
    ("BL", "Blues"),
    ("LT", "Latin"),
    ("RG", "Reggae"),
    ("PP", "Pop"),
    ("ST", "Soundtrack"),
    ("BN", "Bossa Nova"),
    ("EL", "Easy Listening"),
    ("HM", "Heavy Metal"),
    ("RB", "R&B/Soul"),
    ("ED", "Electronica/Dance"),
    ("WD", "World"),
    ("HH", "Hip Hop/Rap"),
    ("SF", "Science Fiction"),
    ("TV", "TV Shows"),
    ("FF", "Sci Fi & Fantasy"),
    ("DR", "Drama"),
    ("CO", "Comedy"),
    ("AL", "Alternative"),
    ("CL", "Classical"),
    ("OP", "Opera"),
];

/// Key for a genre row: its stock key, or `G<id>` for genres the stock
/// export does not have.
pub fn genre_key(id: i64, name: &str) -> String {
    STOCK_GENRE_KEYS
        .iter()
        .find(|(_, stock_name)| *stock_name == name)
        .map(|(key, _)| key.to_string())
        .unwrap_or_else(|| format!("G{}", id))
}

/// Key for an artist row. Ids start at 1, so `A0` stays free for "all".
pub fn artist_key(id: i64, _name: &str) -> String {
    format!("A{}", id)
}
