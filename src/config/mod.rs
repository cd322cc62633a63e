mod file_config;

pub use file_config::{BreakdownConfig, DashboardConfig, FileConfig};

use crate::aggregate::BreakdownParams;
use crate::dashboard::DashboardSettings;
use crate::dataset::Lookups;
use crate::filter::YearRange;
use crate::server::RequestsLoggingLevel;
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::path::PathBuf;
use tracing::warn;

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub dataset_path: Option<PathBuf>,
    pub port: u16,
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub frontend_dir_path: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    // Core settings
    pub dataset_path: PathBuf,
    pub port: u16,
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub frontend_dir_path: Option<String>,

    // Feature configs (with defaults)
    pub dashboard: DashboardSettings,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let dataset_path = file
            .dataset_path
            .map(PathBuf::from)
            .or_else(|| cli.dataset_path.clone())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "dataset_path must be specified on the command line or in config file"
                )
            })?;

        if !dataset_path.exists() {
            bail!("Dataset file does not exist: {:?}", dataset_path);
        }
        if !dataset_path.is_file() {
            bail!("dataset_path is not a file: {:?}", dataset_path);
        }

        let port = file.port.unwrap_or(cli.port);
        let metrics_port = file.metrics_port.unwrap_or(cli.metrics_port);

        let logging_level = file
            .logging_level
            .and_then(|s| parse_logging_level(&s))
            .unwrap_or_else(|| cli.logging_level.clone());

        let frontend_dir_path = file
            .frontend_dir_path
            .or_else(|| cli.frontend_dir_path.clone());

        let defaults = DashboardSettings::default();
        let dashboard_file = file.dashboard.unwrap_or_default();
        let breakdown = resolve_breakdown(file.breakdown.as_ref())?;

        let top_genres = dashboard_file.top_genres.unwrap_or(defaults.top_genres);
        if top_genres.is_empty() {
            bail!("dashboard.top_genres must name at least one genre key");
        }

        let dashboard = DashboardSettings {
            top_genres,
            initial_years: dashboard_file
                .initial_years
                .map(YearRange::from)
                .unwrap_or(defaults.initial_years),
            breakdown,
        };

        Ok(Self {
            dataset_path,
            port,
            metrics_port,
            logging_level,
            frontend_dir_path,
            dashboard,
        })
    }

    /// Checks the dashboard settings against the loaded lookups. Top genre
    /// keys the dataset does not know are logged, and it is an error when
    /// none of them is known since the initial dashboard would be empty.
    pub fn check_against(&self, lookups: &Lookups) -> Result<()> {
        let top_genres = &self.dashboard.top_genres;
        let unknown: Vec<&str> = top_genres
            .iter()
            .map(String::as_str)
            .filter(|key| lookups.genres.name_of(key).is_none())
            .collect();
        if unknown.len() == top_genres.len() {
            bail!(
                "None of dashboard.top_genres {:?} is a genre key of the dataset",
                top_genres
            );
        }
        if !unknown.is_empty() {
            warn!("Unknown genre keys in dashboard.top_genres: {:?}", unknown);
        }
        Ok(())
    }
}

/// Breakdown parameters from the `[breakdown]` section, defaults for what it
/// leaves out.
pub fn resolve_breakdown(file: Option<&BreakdownConfig>) -> Result<BreakdownParams> {
    let defaults = BreakdownParams::default();
    let Some(file) = file else {
        return Ok(defaults);
    };

    let min_share = file.min_share.unwrap_or(defaults.min_share);
    if !(0.0..=1.0).contains(&min_share) {
        bail!("breakdown.min_share must be within [0, 1], got {}", min_share);
    }
    Ok(BreakdownParams {
        top_count: file.top_count.unwrap_or(defaults.top_count),
        min_share,
    })
}

/// Parses a logging level string into RequestsLoggingLevel.
/// Uses clap's ValueEnum trait for parsing.
fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}
