//! Control state and the events that change it.

use crate::aggregate::BreakdownParams;
use crate::dataset::LookupTable;
use crate::filter::{ArtistSelection, FilterCriteria, YearRange};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// Genre keys selected by [`GenreGranularity::Top`] unless configured otherwise.
pub const DEFAULT_TOP_GENRES: [&str; 5] = ["RK", "MT", "LT", "AP", "JZ"];

/// Year range used until the user selects points on the overview chart.
pub const DEFAULT_INITIAL_YEARS: [i32; 2] = [2010, 2012];

/// Months per overview chart row of points.
const MONTHS_PER_YEAR: usize = 12;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenreGranularity {
    All,
    Top,
    Custom,
}

impl GenreGranularity {
    /// The genre selection this granularity imposes.
    pub fn selection(&self, genres: &LookupTable, top: &[String]) -> BTreeSet<String> {
        match self {
            GenreGranularity::All => genres.keys().map(str::to_string).collect(),
            GenreGranularity::Top => top.iter().cloned().collect(),
            GenreGranularity::Custom => BTreeSet::new(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtistGranularity {
    All,
    Custom,
}

impl ArtistGranularity {
    pub fn selection(&self) -> ArtistSelection {
        match self {
            ArtistGranularity::All => ArtistSelection::All,
            ArtistGranularity::Custom => ArtistSelection::none(),
        }
    }
}

/// Points the user dragged over on the monthly overview chart, as 0-based
/// month indices from the first month of the dataset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSelection {
    pub points: Vec<usize>,
}

impl ChartSelection {
    /// Year range covered by the selected points, `None` when nothing is selected.
    ///
    /// Only indices below `month_count` (the overview length) are considered.
    pub fn year_range(&self, start_year: i32, month_count: usize) -> Option<YearRange> {
        let to_year = |index: usize| {
            i32::try_from(index / MONTHS_PER_YEAR)
                .ok()
                .and_then(|offset| start_year.checked_add(offset))
        };
        let in_range = || self.points.iter().copied().filter(|i| *i < month_count);
        if in_range().count() < self.points.len() {
            debug!(
                "Ignoring chart points past the {} month overview",
                month_count
            );
        }
        let first = to_year(in_range().min()?)?;
        let last = to_year(in_range().max()?)?;
        Some(YearRange::new(first, last))
    }
}

/// Current value of every dashboard control.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    pub genre_granularity: GenreGranularity,
    pub artist_granularity: ArtistGranularity,
    pub genres: BTreeSet<String>,
    pub artists: ArtistSelection,
    pub years: YearRange,
    #[serde(default)]
    pub chart_selection: Option<ChartSelection>,
}

impl Controls {
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            artists: self.artists.clone(),
            genres: self.genres.clone(),
            years: self.years,
        }
    }
}

/// A single user interaction with one control.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ControlEvent {
    GenreGranularity { value: GenreGranularity },
    ArtistGranularity { value: ArtistGranularity },
    Genres { keys: BTreeSet<String> },
    Artists { keys: ArtistSelection },
    Years { range: YearRange },
    ChartSelection { selection: Option<ChartSelection> },
}

/// Tunables of the dashboard, resolved from configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct DashboardSettings {
    pub top_genres: Vec<String>,
    pub initial_years: YearRange,
    pub breakdown: BreakdownParams,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        DashboardSettings {
            top_genres: DEFAULT_TOP_GENRES.iter().map(|k| k.to_string()).collect(),
            initial_years: YearRange::from(DEFAULT_INITIAL_YEARS),
            breakdown: BreakdownParams::default(),
        }
    }
}
