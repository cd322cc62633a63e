use super::criteria::FilterCriteria;
use crate::dataset::{DatasetContext, Lookups, TransactionRecord};

/// Returns the records matching every predicate of `criteria`, in their
/// original order. Records are borrowed, never copied or modified.
pub fn filter<'a>(
    records: &'a [TransactionRecord],
    criteria: &FilterCriteria,
    lookups: &Lookups,
) -> Vec<&'a TransactionRecord> {
    let resolved = criteria.resolve(lookups);
    records.iter().filter(|r| resolved.matches(r)).collect()
}

/// [`filter`] over the whole loaded dataset.
pub fn filter_dataset<'a>(
    context: &'a DatasetContext,
    criteria: &FilterCriteria,
) -> Vec<&'a TransactionRecord> {
    filter(context.records(), criteria, context.lookups())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::summarize;
    use crate::dataset::TransactionRecord;
    use crate::filter::{ArtistSelection, YearRange};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::collections::BTreeSet;

    fn record(
        line_id: i64,
        track_id: i64,
        genre: Option<&str>,
        artist: Option<&str>,
        year: i32,
        cents: i64,
    ) -> TransactionRecord {
        TransactionRecord {
            line_id,
            invoice_id: line_id,
            track_id,
            unit_price: Decimal::new(cents, 2),
            quantity: 1,
            invoice_date: NaiveDate::from_ymd_opt(year, 6, 1).unwrap(),
            billing_country: "USA".to_string(),
            genre_name: genre.map(str::to_string),
            artist_name: artist.map(str::to_string),
        }
    }

    fn lookups() -> Lookups {
        Lookups {
            genres: [("RK", "Rock"), ("JZ", "Jazz")].into_iter().collect(),
            artists: [("AX", "X"), ("AY", "Y")].into_iter().collect(),
        }
    }

    // Rock, Jazz, Rock in 2010-2012. Every record sells a different track, so
    // unique track counts equal row counts.
    fn three_records() -> Vec<TransactionRecord> {
        vec![
            record(1, 10, Some("Rock"), Some("X"), 2010, 99),
            record(2, 20, Some("Jazz"), Some("Y"), 2011, 129),
            record(3, 30, Some("Rock"), Some("X"), 2012, 99),
        ]
    }

    fn genres(keys: &[&str]) -> BTreeSet<String> {
        keys.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn rock_for_all_artists_over_three_years() {
        let records = three_records();
        let criteria = FilterCriteria {
            artists: ArtistSelection::All,
            genres: genres(&["RK"]),
            years: YearRange::new(2010, 2012),
        };

        let subset = filter(&records, &criteria, &lookups());
        let ids: Vec<i64> = subset.iter().map(|r| r.line_id).collect();
        assert_eq!(ids, vec![1, 3]);

        let summary = summarize(&subset);
        assert_eq!(summary.total_sales, Decimal::new(198, 2));
        assert_eq!(summary.row_count, 2);
        assert_eq!(summary.unique_tracks, 2);
        assert_eq!(summary.unique_countries, 1);
    }

    #[test]
    fn empty_genre_selection_yields_nothing() {
        let records = three_records();
        let criteria = FilterCriteria {
            artists: ArtistSelection::All,
            genres: BTreeSet::new(),
            years: YearRange::new(2000, 2020),
        };
        assert!(filter(&records, &criteria, &lookups()).is_empty());
    }

    #[test]
    fn empty_artist_selection_yields_nothing() {
        let records = three_records();
        let criteria = FilterCriteria {
            artists: ArtistSelection::none(),
            genres: genres(&["RK", "JZ"]),
            years: YearRange::new(2000, 2020),
        };
        assert!(filter(&records, &criteria, &lookups()).is_empty());
    }

    #[test]
    fn unknown_keys_match_nothing() {
        let records = three_records();
        let criteria = FilterCriteria {
            artists: ["NOPE"].into_iter().collect(),
            genres: genres(&["RK", "??"]),
            years: YearRange::new(2000, 2020),
        };
        assert!(filter(&records, &criteria, &lookups()).is_empty());
    }

    #[test]
    fn explicit_artist_and_year_bounds_are_inclusive() {
        let records = three_records();
        let criteria = FilterCriteria {
            artists: ["AX"].into_iter().collect(),
            genres: genres(&["RK", "JZ"]),
            years: YearRange::new(2012, 2012),
        };

        let subset = filter(&records, &criteria, &lookups());
        assert_eq!(subset.len(), 1);
        assert_eq!(subset[0].line_id, 3);
    }

    #[test]
    fn all_artists_keeps_records_without_artist() {
        let records = vec![
            record(1, 10, Some("Rock"), None, 2010, 99),
            record(2, 11, None, Some("X"), 2010, 99),
        ];
        let criteria = FilterCriteria {
            artists: ArtistSelection::All,
            genres: genres(&["RK"]),
            years: YearRange::new(2010, 2010),
        };

        let subset = filter(&records, &criteria, &lookups());
        // Line 2 has no genre so the genre predicate rejects it
        assert_eq!(subset.len(), 1);
        assert_eq!(subset[0].line_id, 1);
    }

    #[test]
    fn reversed_year_range_is_normalized() {
        let records = three_records();
        let criteria = FilterCriteria {
            artists: ArtistSelection::All,
            genres: genres(&["RK", "JZ"]),
            years: YearRange::new(2011, 2010),
        };
        assert_eq!(filter(&records, &criteria, &lookups()).len(), 2);
    }
}
