use anyhow::{Context, Result};
use clap::Parser;
use media_sales_dashboard::config::{AppConfig, CliConfig, FileConfig};
use media_sales_dashboard::dashboard::Dashboard;
use media_sales_dashboard::dataset::load_dataset;
use media_sales_dashboard::server::{self, run_server, RequestsLoggingLevel, ServerConfig};
use std::sync::Arc;
use std::{fmt::Debug, path::PathBuf};
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to the Chinook SQLite export.
    #[clap(value_parser = parse_path)]
    pub dataset_path: Option<PathBuf>,

    /// Path to a TOML config file. Its values override command line values.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 8050)]
    pub port: u16,

    /// The port for the metrics server (Prometheus scraping).
    #[clap(long, default_value_t = 9091)]
    pub metrics_port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Path to the frontend directory to be statically served.
    #[clap(long)]
    pub frontend_dir_path: Option<String>,
}

impl From<CliArgs> for CliConfig {
    fn from(args: CliArgs) -> Self {
        CliConfig {
            dataset_path: args.dataset_path,
            port: args.port,
            metrics_port: args.metrics_port,
            logging_level: args.logging_level,
            frontend_dir_path: args.frontend_dir_path,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Reading config file {:?}...", path);
            Some(FileConfig::load(path)?)
        }
        None => None,
    };
    let config = AppConfig::resolve(&CliConfig::from(cli_args), file_config)?;

    info!("Loading dataset from {:?}...", config.dataset_path);
    let context = load_dataset(&config.dataset_path)
        .with_context(|| format!("Failed to load dataset {:?}", config.dataset_path))?;
    config.check_against(context.lookups())?;

    info!("Initializing metrics...");
    server::metrics::init_metrics();
    server::metrics::init_dataset_metrics(
        context.len(),
        context.lookups().genres.len(),
        context.lookups().artists.len(),
    );

    let dashboard = Arc::new(Dashboard::new(Arc::new(context), config.dashboard.clone()));

    info!("Ready to serve at port {}!", config.port);
    info!("Metrics available at port {}!", config.metrics_port);
    run_server(
        dashboard,
        ServerConfig {
            requests_logging_level: config.logging_level,
            port: config.port,
            metrics_port: config.metrics_port,
            frontend_dir_path: config.frontend_dir_path,
        },
    )
    .await
}
