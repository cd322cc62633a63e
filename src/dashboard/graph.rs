//! Static dependency table between controls and dashboard outputs.
//!
//! Some outputs are themselves control values (the genre selection set by the
//! genre granularity, for instance). Those feed back into the graph as inputs
//! and are evaluated before any view output. No control output depends on
//! another control output, so one ordered pass reaches the fixed point.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Input {
    GenreGranularity,
    ArtistGranularity,
    Genres,
    Artists,
    Years,
    ChartSelection,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Output {
    GenreSelection,
    ArtistSelection,
    YearRange,
    YearLabel,
    SalesCount,
    SummaryText,
    MonthlyAggregate,
    Breakdowns,
    Overview,
}

const FILTER_INPUTS: &[Input] = &[Input::Artists, Input::Genres, Input::Years];

/// Every output with the inputs it reads, control outputs first.
pub const DEPENDENCIES: &[(Output, &[Input])] = &[
    (Output::GenreSelection, &[Input::GenreGranularity]),
    (Output::ArtistSelection, &[Input::ArtistGranularity]),
    (Output::YearRange, &[Input::ChartSelection]),
    (Output::YearLabel, &[Input::Years]),
    (Output::SalesCount, FILTER_INPUTS),
    (Output::SummaryText, FILTER_INPUTS),
    (Output::MonthlyAggregate, FILTER_INPUTS),
    (Output::Breakdowns, FILTER_INPUTS),
    (Output::Overview, FILTER_INPUTS),
];

impl Input {
    pub fn name(&self) -> &'static str {
        match self {
            Input::GenreGranularity => "genre_granularity",
            Input::ArtistGranularity => "artist_granularity",
            Input::Genres => "genres",
            Input::Artists => "artists",
            Input::Years => "years",
            Input::ChartSelection => "chart_selection",
        }
    }
}

impl Output {
    pub fn name(&self) -> &'static str {
        match self {
            Output::GenreSelection => "genre_selection",
            Output::ArtistSelection => "artist_selection",
            Output::YearRange => "year_range",
            Output::YearLabel => "year_label",
            Output::SalesCount => "sales_count",
            Output::SummaryText => "summary_text",
            Output::MonthlyAggregate => "monthly_aggregate",
            Output::Breakdowns => "breakdowns",
            Output::Overview => "overview",
        }
    }

    /// The input this output writes to, for outputs that are control values.
    pub fn feeds(&self) -> Option<Input> {
        match self {
            Output::GenreSelection => Some(Input::Genres),
            Output::ArtistSelection => Some(Input::Artists),
            Output::YearRange => Some(Input::Years),
            _ => None,
        }
    }

    pub fn is_control(&self) -> bool {
        self.feeds().is_some()
    }

    pub fn dependencies(&self) -> &'static [Input] {
        DEPENDENCIES
            .iter()
            .find(|(output, _)| output == self)
            .map(|(_, inputs)| *inputs)
            .unwrap_or(&[])
    }

    pub fn is_affected_by(&self, changed: &BTreeSet<Input>) -> bool {
        self.dependencies().iter().any(|input| changed.contains(input))
    }
}

pub fn control_outputs() -> impl Iterator<Item = Output> {
    DEPENDENCIES
        .iter()
        .map(|(output, _)| *output)
        .filter(Output::is_control)
}

pub fn view_outputs() -> impl Iterator<Item = Output> {
    DEPENDENCIES
        .iter()
        .map(|(output, _)| *output)
        .filter(|output| !output.is_control())
}

/// View outputs to recompute once `changed` inputs have settled.
pub fn affected_views(changed: &BTreeSet<Input>) -> Vec<Output> {
    view_outputs()
        .filter(|output| output.is_affected_by(changed))
        .collect()
}
