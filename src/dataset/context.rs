use super::error::DatasetError;
use super::models::{DateSpan, Lookups, TransactionRecord};

/// The loaded dataset, immutable for the process lifetime.
///
/// Every filter and aggregator call receives this explicitly; there is no
/// global dataset state.
#[derive(Debug, Clone)]
pub struct DatasetContext {
    records: Vec<TransactionRecord>,
    lookups: Lookups,
    span: DateSpan,
}

impl DatasetContext {
    pub fn new(records: Vec<TransactionRecord>, lookups: Lookups) -> Result<Self, DatasetError> {
        let span = DateSpan::of(records.iter().map(|r| r.invoice_date))
            .ok_or(DatasetError::Empty)?;
        Ok(DatasetContext {
            records,
            lookups,
            span,
        })
    }

    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    pub fn lookups(&self) -> &Lookups {
        &self.lookups
    }

    /// First to last invoice date across the whole unfiltered dataset.
    pub fn span(&self) -> DateSpan {
        self.span
    }

    pub fn first_year(&self) -> i32 {
        self.span.first_year()
    }

    pub fn last_year(&self) -> i32 {
        self.span.last_year()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
