//! Media Sales Dashboard Library
//!
//! Loads the Chinook store sales export once and recomputes the dashboard
//! outputs (summary, monthly series, proportion breakdowns) from control
//! values. This library exposes the modules to the binaries and the tests.

pub mod aggregate;
pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod filter;
pub mod server;
pub mod sqlite_persistence;

// Re-export commonly used types for convenience
pub use dashboard::{ControlEvent, Controls, Dashboard, DashboardSettings};
pub use dataset::{load_dataset, DatasetContext, DatasetError};
pub use server::{run_server, RequestsLoggingLevel};
