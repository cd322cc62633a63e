//! Reactive update graph: control state, dependency table and the dashboard
//! outputs recomputed from them.

mod controls;
mod engine;
pub mod graph;
mod view;

pub use controls::{
    ArtistGranularity, ChartSelection, ControlEvent, Controls, DashboardSettings,
    GenreGranularity, DEFAULT_INITIAL_YEARS, DEFAULT_TOP_GENRES,
};
pub use engine::Dashboard;
pub use graph::{Input, Output};
pub use view::{
    BreakdownsView, DashboardUpdate, DashboardView, OutputValue, OverviewChart, OverviewPoint,
    YearLabel,
};
