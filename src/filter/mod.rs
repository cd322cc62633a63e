mod criteria;
mod engine;

pub use criteria::{ArtistSelection, FilterCriteria, ResolvedFilter, YearRange, ALL_ARTISTS_KEY};
pub use engine::{filter, filter_dataset};
