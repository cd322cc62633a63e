use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    // Core settings (can override CLI)
    pub dataset_path: Option<String>,
    pub port: Option<u16>,
    pub metrics_port: Option<u16>,
    pub logging_level: Option<String>,
    pub frontend_dir_path: Option<String>,

    // Feature configs
    pub dashboard: Option<DashboardConfig>,
    pub breakdown: Option<BreakdownConfig>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct DashboardConfig {
    /// Year range shown before any chart selection, as `[lower, upper]`.
    pub initial_years: Option<[i32; 2]>,
    /// Genre keys selected by the "top" granularity.
    pub top_genres: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct BreakdownConfig {
    pub top_count: Option<usize>,
    pub min_share: Option<f64>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_every_section() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
dataset_path = "/data/chinook.db"
port = 8050
logging_level = "headers"

[dashboard]
initial_years = [2011, 2013]
top_genres = ["RK", "JZ"]

[breakdown]
top_count = 3
min_share = 0.1
"#
        )
        .unwrap();

        let config = FileConfig::load(file.path()).unwrap();
        assert_eq!(config.dataset_path.as_deref(), Some("/data/chinook.db"));
        assert_eq!(config.port, Some(8050));
        assert_eq!(config.metrics_port, None);
        assert_eq!(config.logging_level.as_deref(), Some("headers"));

        let dashboard = config.dashboard.unwrap();
        assert_eq!(dashboard.initial_years, Some([2011, 2013]));
        assert_eq!(
            dashboard.top_genres,
            Some(vec!["RK".to_string(), "JZ".to_string()])
        );

        let breakdown = config.breakdown.unwrap();
        assert_eq!(breakdown.top_count, Some(3));
        assert_eq!(breakdown.min_share, Some(0.1));
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let config = FileConfig::load(file.path()).unwrap();
        assert!(config.dataset_path.is_none());
        assert!(config.dashboard.is_none());
        assert!(config.breakdown.is_none());
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = FileConfig::load(Path::new("/nonexistent/dashboard.toml"));
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Failed to read config file"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port = \"not a number\"").unwrap();
        let result = FileConfig::load(file.path());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Failed to parse config file"));
    }
}
