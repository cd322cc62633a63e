//! In-memory representation of the sales dataset.
//!
//! Everything here is built once by the loader and never mutated afterwards.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One invoice line item joined with its invoice, track, genre, album and artist.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub line_id: i64,
    pub invoice_id: i64,
    pub track_id: i64,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub invoice_date: NaiveDate,
    pub billing_country: String,
    /// `None` when the track has no genre linkage.
    pub genre_name: Option<String>,
    /// `None` when the track has no album or the album has no artist.
    pub artist_name: Option<String>,
}

impl TransactionRecord {
    pub fn year(&self) -> i32 {
        self.invoice_date.year()
    }
}

/// Static key -> display name mapping used to translate control selections.
///
/// Keys are kept ordered so option lists are stable across runs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LookupTable {
    entries: BTreeMap<String, String>,
}

impl LookupTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<K: Into<String>, V: Into<String>>(&mut self, key: K, name: V) {
        self.entries.insert(key.into(), name.into());
    }

    pub fn name_of(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|s| s.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LookupTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = LookupTable::new();
        for (key, name) in iter {
            table.insert(key, name);
        }
        table
    }
}

/// The genre and artist lookup tables.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Lookups {
    pub genres: LookupTable,
    pub artists: LookupTable,
}

/// Inclusive calendar span covered by the whole unfiltered dataset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateSpan {
    pub first: NaiveDate,
    pub last: NaiveDate,
}

impl DateSpan {
    /// Builds the span of `dates`, `None` if there are no dates.
    pub fn of<I: IntoIterator<Item = NaiveDate>>(dates: I) -> Option<Self> {
        let mut iter = dates.into_iter();
        let first = iter.next()?;
        let (first, last) = iter.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
        Some(DateSpan { first, last })
    }

    pub fn first_year(&self) -> i32 {
        self.first.year()
    }

    pub fn last_year(&self) -> i32 {
        self.last.year()
    }

    /// Calendar months touched by the span, i.e. the length of a monthly series.
    pub fn month_count(&self) -> usize {
        let months = (self.last.year() - self.first.year()) * 12 + self.last.month() as i32
            - self.first.month() as i32
            + 1;
        usize::try_from(months).unwrap_or(0)
    }

    /// Every day in the span, both ends included.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let last = self.last;
        self.first.iter_days().take_while(move |d| *d <= last)
    }
}
