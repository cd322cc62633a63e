use super::controls::Controls;
use super::graph::Output;
use crate::aggregate::{CategoryBreakdown, MonthlySeries, SummaryText};
use crate::filter::YearRange;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearLabel {
    pub text: String,
}

impl From<YearRange> for YearLabel {
    fn from(years: YearRange) -> Self {
        YearLabel {
            text: format!("Year Selected: {}", years),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverviewPoint {
    pub month_end: NaiveDate,
    pub revenue: Decimal,
    pub quantity: u64,
    /// Whether the month falls inside the selected year range.
    pub active: bool,
}

/// Monthly revenue over the whole dataset, with the selected years highlighted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverviewChart {
    pub points: Vec<OverviewPoint>,
}

impl OverviewChart {
    pub fn active_count(&self) -> usize {
        self.points.iter().filter(|p| p.active).count()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownsView {
    pub title: String,
    pub breakdowns: Vec<CategoryBreakdown>,
}

/// The freshly computed value of one output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "output", content = "value", rename_all = "snake_case")]
pub enum OutputValue {
    YearLabel(YearLabel),
    SalesCount(usize),
    SummaryText(SummaryText),
    MonthlyAggregate(MonthlySeries),
    Breakdowns(BreakdownsView),
    Overview(OverviewChart),
}

impl OutputValue {
    pub fn output(&self) -> Output {
        match self {
            OutputValue::YearLabel(_) => Output::YearLabel,
            OutputValue::SalesCount(_) => Output::SalesCount,
            OutputValue::SummaryText(_) => Output::SummaryText,
            OutputValue::MonthlyAggregate(_) => Output::MonthlyAggregate,
            OutputValue::Breakdowns(_) => Output::Breakdowns,
            OutputValue::Overview(_) => Output::Overview,
        }
    }
}

/// Every view output for one set of controls.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardView {
    pub controls: Controls,
    pub year_label: YearLabel,
    pub sales_count: usize,
    pub summary: SummaryText,
    pub monthly: MonthlySeries,
    pub breakdowns: BreakdownsView,
    pub overview: OverviewChart,
}

/// Result of one event: the settled controls, which outputs were
/// recomputed, and their values. Outputs not listed keep their old value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardUpdate {
    pub controls: Controls,
    pub recomputed: Vec<Output>,
    pub values: Vec<OutputValue>,
}

impl DashboardUpdate {
    pub fn value_of(&self, output: Output) -> Option<&OutputValue> {
        self.values.iter().find(|v| v.output() == output)
    }
}
