//! Filter criteria as the controls express them (selection keys), and their
//! resolved form (display names) used to test records.

use crate::dataset::{LookupTable, Lookups, TransactionRecord};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

/// Artist key meaning "every artist".
pub const ALL_ARTISTS_KEY: &str = "A0";

/// Artist part of the filter. On the wire this is a plain list of keys, where
/// any list containing [`ALL_ARTISTS_KEY`] means "all".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub enum ArtistSelection {
    All,
    Keys(BTreeSet<String>),
}

impl ArtistSelection {
    pub fn none() -> Self {
        ArtistSelection::Keys(BTreeSet::new())
    }

    pub fn is_all(&self) -> bool {
        matches!(self, ArtistSelection::All)
    }
}

impl<S: Into<String>> FromIterator<S> for ArtistSelection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let keys: BTreeSet<String> = iter.into_iter().map(Into::into).collect();
        if keys.contains(ALL_ARTISTS_KEY) {
            ArtistSelection::All
        } else {
            ArtistSelection::Keys(keys)
        }
    }
}

impl From<Vec<String>> for ArtistSelection {
    fn from(keys: Vec<String>) -> Self {
        keys.into_iter().collect()
    }
}

impl From<ArtistSelection> for Vec<String> {
    fn from(selection: ArtistSelection) -> Self {
        match selection {
            ArtistSelection::All => vec![ALL_ARTISTS_KEY.to_string()],
            ArtistSelection::Keys(keys) => keys.into_iter().collect(),
        }
    }
}

/// Inclusive calendar year range. Construction normalizes reversed bounds by
/// swapping them, so `lower() <= upper()` always holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[i32; 2]", into = "[i32; 2]")]
pub struct YearRange {
    lower: i32,
    upper: i32,
}

impl YearRange {
    pub fn new(a: i32, b: i32) -> Self {
        YearRange {
            lower: a.min(b),
            upper: a.max(b),
        }
    }

    pub fn lower(&self) -> i32 {
        self.lower
    }

    pub fn upper(&self) -> i32 {
        self.upper
    }

    pub fn contains(&self, year: i32) -> bool {
        self.lower <= year && year <= self.upper
    }
}

impl From<[i32; 2]> for YearRange {
    fn from(bounds: [i32; 2]) -> Self {
        YearRange::new(bounds[0], bounds[1])
    }
}

impl From<YearRange> for [i32; 2] {
    fn from(range: YearRange) -> Self {
        [range.lower, range.upper]
    }
}

impl std::fmt::Display for YearRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.lower, self.upper)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub artists: ArtistSelection,
    pub genres: BTreeSet<String>,
    pub years: YearRange,
}

impl FilterCriteria {
    /// Same artist and genre selection over a different year window.
    pub fn with_years(&self, years: YearRange) -> Self {
        FilterCriteria {
            artists: self.artists.clone(),
            genres: self.genres.clone(),
            years,
        }
    }

    /// Translates selection keys into display names. Unknown keys are dropped,
    /// so they end up matching nothing.
    pub fn resolve(&self, lookups: &Lookups) -> ResolvedFilter {
        let artist_names = match &self.artists {
            ArtistSelection::All => None,
            ArtistSelection::Keys(keys) => Some(translate(keys, &lookups.artists, "artist")),
        };
        ResolvedFilter {
            artist_names,
            genre_names: translate(&self.genres, &lookups.genres, "genre"),
            years: self.years,
        }
    }
}

fn translate(keys: &BTreeSet<String>, table: &LookupTable, kind: &str) -> HashSet<String> {
    keys.iter()
        .filter_map(|key| {
            let name = table.name_of(key);
            if name.is_none() {
                debug!("Unknown {} key '{}' matches nothing", kind, key);
            }
            name.map(str::to_string)
        })
        .collect()
}

/// Filter criteria expressed in display names, ready to test records.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedFilter {
    /// `None` means every artist, including records without one.
    artist_names: Option<HashSet<String>>,
    genre_names: HashSet<String>,
    years: YearRange,
}

impl ResolvedFilter {
    pub fn matches(&self, record: &TransactionRecord) -> bool {
        let artist_ok = match &self.artist_names {
            None => true,
            Some(names) => record
                .artist_name
                .as_ref()
                .is_some_and(|name| names.contains(name)),
        };
        let genre_ok = record
            .genre_name
            .as_ref()
            .is_some_and(|name| self.genre_names.contains(name));
        let year_ok = self.years.contains(record.year());

        artist_ok & genre_ok & year_ok
    }
}
