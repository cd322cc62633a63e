//! Monthly trend series.
//!
//! Records are bucketed per calendar day, the daily series is reindexed over
//! the full dataset span with zero fill, then summed into calendar months.
//! Distinct counts are distinct per day and summed across the month, so a
//! track sold on two days of the same month counts twice.

use crate::dataset::{DateSpan, TransactionRecord};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyPoint {
    /// Last calendar day of the month.
    pub month_end: NaiveDate,
    pub revenue: Decimal,
    pub unique_tracks: usize,
    pub unique_countries: usize,
    /// Sum of line item quantities.
    pub quantity: u64,
}

impl MonthlyPoint {
    fn empty(month_end: NaiveDate) -> Self {
        MonthlyPoint {
            month_end,
            revenue: Decimal::ZERO,
            unique_tracks: 0,
            unique_countries: 0,
            quantity: 0,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySeries {
    pub points: Vec<MonthlyPoint>,
}

impl MonthlySeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[derive(Default)]
struct DayBucket<'a> {
    revenue: Decimal,
    tracks: HashSet<i64>,
    countries: HashSet<&'a str>,
    quantity: u64,
}

pub fn month_end(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .unwrap_or(date)
}

/// Builds one point per calendar month of `span`, whatever the subset holds.
/// Records dated outside `span` are ignored.
pub fn monthly_series(subset: &[&TransactionRecord], span: DateSpan) -> MonthlySeries {
    let mut days: HashMap<NaiveDate, DayBucket> = HashMap::new();
    for record in subset {
        let bucket = days.entry(record.invoice_date).or_default();
        bucket.revenue += record.unit_price;
        bucket.tracks.insert(record.track_id);
        bucket.countries.insert(record.billing_country.as_str());
        bucket.quantity += u64::from(record.quantity);
    }

    let mut points: Vec<MonthlyPoint> = Vec::new();
    for day in span.days() {
        let current_end = month_end(day);
        if points.last().map(|p| p.month_end) != Some(current_end) {
            points.push(MonthlyPoint::empty(current_end));
        }
        let (Some(point), Some(bucket)) = (points.last_mut(), days.get(&day)) else {
            continue;
        };
        point.revenue += bucket.revenue;
        point.unique_tracks += bucket.tracks.len();
        point.unique_countries += bucket.countries.len();
        point.quantity += bucket.quantity;
    }

    MonthlySeries { points }
}
