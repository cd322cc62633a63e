use super::controls::{
    ArtistGranularity, ControlEvent, Controls, DashboardSettings, GenreGranularity,
};
use super::graph::{self, Input, Output};
use super::view::{
    BreakdownsView, DashboardUpdate, DashboardView, OutputValue, OverviewChart, OverviewPoint,
    YearLabel,
};
use crate::aggregate::{
    breakdown, monthly_series, summarize, CategoryBreakdown, CategoryField, MonthlySeries,
};
use crate::dataset::{DatasetContext, TransactionRecord};
use crate::filter::{filter_dataset, YearRange};
use crate::server::metrics;
use chrono::Datelike;
use rayon::prelude::*;
use std::cell::OnceCell;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

impl ControlEvent {
    pub fn input(&self) -> Input {
        match self {
            ControlEvent::GenreGranularity { .. } => Input::GenreGranularity,
            ControlEvent::ArtistGranularity { .. } => Input::ArtistGranularity,
            ControlEvent::Genres { .. } => Input::Genres,
            ControlEvent::Artists { .. } => Input::Artists,
            ControlEvent::Years { .. } => Input::Years,
            ControlEvent::ChartSelection { .. } => Input::ChartSelection,
        }
    }

    fn apply_to(self, controls: &mut Controls) {
        match self {
            ControlEvent::GenreGranularity { value } => controls.genre_granularity = value,
            ControlEvent::ArtistGranularity { value } => controls.artist_granularity = value,
            ControlEvent::Genres { keys } => controls.genres = keys,
            ControlEvent::Artists { keys } => controls.artists = keys,
            ControlEvent::Years { range } => controls.years = range,
            ControlEvent::ChartSelection { selection } => controls.chart_selection = selection,
        }
    }
}

/// Recomputes dashboard outputs from control values over a shared dataset.
#[derive(Clone)]
pub struct Dashboard {
    context: Arc<DatasetContext>,
    settings: DashboardSettings,
}

impl Dashboard {
    pub fn new(context: Arc<DatasetContext>, settings: DashboardSettings) -> Self {
        Dashboard { context, settings }
    }

    pub fn context(&self) -> &DatasetContext {
        &self.context
    }

    pub fn settings(&self) -> &DashboardSettings {
        &self.settings
    }

    /// Controls on first page load.
    pub fn initial_controls(&self) -> Controls {
        let genre_granularity = GenreGranularity::Top;
        let artist_granularity = ArtistGranularity::All;
        Controls {
            genre_granularity,
            artist_granularity,
            genres: genre_granularity
                .selection(&self.context.lookups().genres, &self.settings.top_genres),
            artists: artist_granularity.selection(),
            years: self.settings.initial_years,
            chart_selection: None,
        }
    }

    /// Every view output for `controls`, as on initial page load.
    pub fn render(&self, controls: &Controls) -> DashboardView {
        let pass = Pass::new(self, controls);
        DashboardView {
            controls: controls.clone(),
            year_label: pass.timed(Output::YearLabel, || pass.year_label()),
            sales_count: pass.timed(Output::SalesCount, || pass.subset().len()),
            summary: pass.timed(Output::SummaryText, || summarize(pass.subset()).to_text()),
            monthly: pass.timed(Output::MonthlyAggregate, || pass.monthly()),
            breakdowns: pass.timed(Output::Breakdowns, || pass.breakdowns()),
            overview: pass.timed(Output::Overview, || pass.overview()),
        }
    }

    /// Applies one control event, settles the derived control values and
    /// recomputes the outputs depending on whatever changed.
    pub fn apply(&self, controls: &Controls, event: ControlEvent) -> DashboardUpdate {
        let mut controls = controls.clone();
        let mut changed = BTreeSet::new();
        changed.insert(event.input());
        event.apply_to(&mut controls);

        let mut recomputed = Vec::new();
        for output in graph::control_outputs() {
            if !output.is_affected_by(&changed) {
                continue;
            }
            recomputed.push(output);
            if self.settle(output, &mut controls) {
                if let Some(input) = output.feeds() {
                    changed.insert(input);
                }
            }
        }

        let views = graph::affected_views(&changed);
        debug!(
            "Event changed {:?}, recomputing {} view outputs",
            changed,
            views.len()
        );
        let pass = Pass::new(self, &controls);
        let values = views
            .iter()
            .filter_map(|output| pass.timed(*output, || pass.compute(*output)))
            .collect();
        recomputed.extend(views);

        DashboardUpdate {
            controls,
            recomputed,
            values,
        }
    }

    /// Evaluates one control output into `controls`. Returns whether its
    /// value changed.
    fn settle(&self, output: Output, controls: &mut Controls) -> bool {
        match output {
            Output::GenreSelection => {
                let genres = controls
                    .genre_granularity
                    .selection(&self.context.lookups().genres, &self.settings.top_genres);
                replace(&mut controls.genres, genres)
            }
            Output::ArtistSelection => {
                let artists = controls.artist_granularity.selection();
                replace(&mut controls.artists, artists)
            }
            Output::YearRange => {
                let years = controls
                    .chart_selection
                    .as_ref()
                    .and_then(|selection| {
                        selection.year_range(
                            self.context.first_year(),
                            self.context.span().month_count(),
                        )
                    })
                    .unwrap_or(self.settings.initial_years);
                replace(&mut controls.years, years)
            }
            _ => false,
        }
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

/// One recomputation over fixed controls. The filtered subset is shared by
/// all outputs of the pass and built at most once.
struct Pass<'a> {
    dashboard: &'a Dashboard,
    controls: &'a Controls,
    subset: OnceCell<Vec<&'a TransactionRecord>>,
}

impl<'a> Pass<'a> {
    fn new(dashboard: &'a Dashboard, controls: &'a Controls) -> Self {
        Pass {
            dashboard,
            controls,
            subset: OnceCell::new(),
        }
    }

    fn context(&self) -> &'a DatasetContext {
        &self.dashboard.context
    }

    fn subset(&self) -> &[&'a TransactionRecord] {
        self.subset
            .get_or_init(|| filter_dataset(self.context(), &self.controls.criteria()))
    }

    fn timed<T>(&self, output: Output, compute: impl FnOnce() -> T) -> T {
        let start = Instant::now();
        let value = compute();
        metrics::record_recompute(output.name(), start.elapsed());
        value
    }

    fn compute(&self, output: Output) -> Option<OutputValue> {
        let value = match output {
            Output::YearLabel => OutputValue::YearLabel(self.year_label()),
            Output::SalesCount => OutputValue::SalesCount(self.subset().len()),
            Output::SummaryText => OutputValue::SummaryText(summarize(self.subset()).to_text()),
            Output::MonthlyAggregate => OutputValue::MonthlyAggregate(self.monthly()),
            Output::Breakdowns => OutputValue::Breakdowns(self.breakdowns()),
            Output::Overview => OutputValue::Overview(self.overview()),
            Output::GenreSelection | Output::ArtistSelection | Output::YearRange => return None,
        };
        Some(value)
    }

    fn year_label(&self) -> YearLabel {
        YearLabel::from(self.controls.years)
    }

    fn monthly(&self) -> MonthlySeries {
        monthly_series(self.subset(), self.context().span())
    }

    fn breakdowns(&self) -> BreakdownsView {
        let subset = self.subset();
        let params = self.dashboard.settings.breakdown;
        let breakdowns: Vec<CategoryBreakdown> = CategoryField::ALL
            .par_iter()
            .map(|field| breakdown(subset, *field, &params))
            .collect();
        BreakdownsView {
            title: format!(
                "Sales Summary: {} to {}",
                self.controls.years.lower(),
                self.controls.years.upper()
            ),
            breakdowns,
        }
    }

    /// Monthly revenue over every dataset year with the current artist and
    /// genre filters, highlighting the months inside the selected years.
    fn overview(&self) -> OverviewChart {
        let context = self.context();
        let full_range = YearRange::new(context.first_year(), context.last_year());
        let criteria = self.controls.criteria().with_years(full_range);
        let subset = filter_dataset(context, &criteria);
        let series = monthly_series(&subset, context.span());

        let selected = self.controls.years;
        let points = series
            .points
            .into_iter()
            .map(|point| OverviewPoint {
                active: selected.contains(point.month_end.year()),
                month_end: point.month_end,
                revenue: point.revenue,
                quantity: point.quantity,
            })
            .collect();
        OverviewChart { points }
    }
}
