use crate::dataset::TransactionRecord;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScalarSummary {
    /// Sum of unit prices. Quantity is deliberately not multiplied in.
    pub total_sales: Decimal,
    pub unique_tracks: usize,
    pub unique_countries: usize,
    pub row_count: usize,
}

/// Display strings for the summary tiles.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryText {
    pub sales: String,
    pub tracks: String,
    pub countries: String,
    pub row_count: usize,
}

pub fn summarize(subset: &[&TransactionRecord]) -> ScalarSummary {
    let mut tracks = HashSet::new();
    let mut countries = HashSet::new();
    let mut total_sales = Decimal::ZERO;
    for record in subset {
        total_sales += record.unit_price;
        tracks.insert(record.track_id);
        countries.insert(record.billing_country.as_str());
    }
    ScalarSummary {
        total_sales,
        unique_tracks: tracks.len(),
        unique_countries: countries.len(),
        row_count: subset.len(),
    }
}

impl ScalarSummary {
    pub fn to_text(&self) -> SummaryText {
        SummaryText {
            sales: format!(
                "{} USD",
                human_format(self.total_sales.to_f64().unwrap_or_default())
            ),
            tracks: format!("{} Songs", human_format(self.unique_tracks as f64)),
            countries: format!("{} Countries", human_format(self.unique_countries as f64)),
            row_count: self.row_count,
        }
    }
}

const MAGNITUDE_SUFFIXES: [&str; 6] = ["", "K", "M", "G", "T", "P"];

/// Compact rendering: 999 -> "999", 1000 -> "1K", 1234567 -> "1M".
///
/// The mantissa is truncated, never rounded. Zero is special-cased to "0".
pub fn human_format(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }

    let mut mantissa = value.abs();
    let mut magnitude = 0;
    while mantissa >= 1000.0 && magnitude < MAGNITUDE_SUFFIXES.len() - 1 {
        mantissa /= 1000.0;
        magnitude += 1;
    }

    let truncated = mantissa.trunc() as u64;
    let sign = if value < 0.0 && truncated > 0 { "-" } else { "" };
    format!("{}{}{}", sign, truncated, MAGNITUDE_SUFFIXES[magnitude])
}
