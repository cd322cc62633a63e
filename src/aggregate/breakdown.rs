//! Proportion breakdowns with long-tail collapsing.

use crate::dataset::TransactionRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Label for records whose genre or artist linkage is missing.
pub const UNKNOWN_LABEL: &str = "Unknown";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryField {
    Country,
    Genre,
    Artist,
}

impl CategoryField {
    pub const ALL: [CategoryField; 3] = [
        CategoryField::Country,
        CategoryField::Genre,
        CategoryField::Artist,
    ];

    pub fn value_of<'a>(&self, record: &'a TransactionRecord) -> &'a str {
        match self {
            CategoryField::Country => record.billing_country.as_str(),
            CategoryField::Genre => record.genre_name.as_deref().unwrap_or(UNKNOWN_LABEL),
            CategoryField::Artist => record.artist_name.as_deref().unwrap_or(UNKNOWN_LABEL),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            CategoryField::Country => "Countries Proportion",
            CategoryField::Genre => "Genres Proportion",
            CategoryField::Artist => "Artists Proportion",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BreakdownParams {
    /// Up to this many distinct values are always returned as they are.
    pub top_count: usize,
    /// Beyond `top_count`, values with a smaller share go to the "Other" bucket.
    pub min_share: f64,
}

impl Default for BreakdownParams {
    fn default() -> Self {
        BreakdownParams {
            top_count: 5,
            min_share: 0.05,
        }
    }
}

impl BreakdownParams {
    /// "Other < 5%" for the default threshold.
    pub fn other_label(&self) -> String {
        let percent = (self.min_share * 10_000.0).round() / 100.0;
        format!("Other < {}%", percent)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownEntry {
    pub label: String,
    pub count: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub field: CategoryField,
    pub entries: Vec<BreakdownEntry>,
}

impl CategoryBreakdown {
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }
}

/// Counts the values of `field` in `subset`, descending by count (ties by
/// label), collapsing the long tail once there are more than `top_count`.
pub fn breakdown(
    subset: &[&TransactionRecord],
    field: CategoryField,
    params: &BreakdownParams,
) -> CategoryBreakdown {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in subset {
        *counts.entry(field.value_of(record)).or_insert(0) += 1;
    }

    let mut entries: Vec<BreakdownEntry> = counts
        .into_iter()
        .map(|(label, count)| BreakdownEntry {
            label: label.to_string(),
            count,
        })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));

    if entries.len() <= params.top_count {
        return CategoryBreakdown { field, entries };
    }

    let total = subset.len() as f64;
    let (kept, collapsed): (Vec<BreakdownEntry>, Vec<BreakdownEntry>) = entries
        .into_iter()
        .partition(|e| e.count as f64 / total >= params.min_share);

    let mut entries = kept;
    if !collapsed.is_empty() {
        entries.push(BreakdownEntry {
            label: params.other_label(),
            count: collapsed.iter().map(|e| e.count).sum(),
        });
    }
    CategoryBreakdown { field, entries }
}
