mod breakdown;
mod monthly;
mod summary;

pub use breakdown::{
    breakdown, BreakdownEntry, BreakdownParams, CategoryBreakdown, CategoryField, UNKNOWN_LABEL,
};
pub use monthly::{month_end, monthly_series, MonthlyPoint, MonthlySeries};
pub use summary::{human_format, summarize, ScalarSummary, SummaryText};
