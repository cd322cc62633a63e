use anyhow::Result;
use std::time::Duration;

use tracing::{error, info};

use tower_http::services::ServeDir;

use axum::{
    extract::State,
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::{log_requests, metrics, state::*, ServerConfig};
use crate::dashboard::{ControlEvent, Controls, Dashboard};
use crate::filter::{YearRange, ALL_ARTISTS_KEY};
use std::sync::Arc;

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub hash: String,
    pub rows: usize,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

/// One entry of a multi-select dropdown.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct OptionEntry {
    pub key: String,
    pub label: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DashboardOptions {
    pub genres: Vec<OptionEntry>,
    pub artists: Vec<OptionEntry>,
    pub year_bounds: YearRange,
    pub defaults: Controls,
}

#[derive(Deserialize, Debug)]
struct EventBody {
    pub controls: Controls,
    pub event: ControlEvent,
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        hash: state.hash.clone(),
        rows: state.dashboard.context().len(),
    };
    Json(stats)
}

fn dashboard_options(dashboard: &Dashboard) -> DashboardOptions {
    let context = dashboard.context();
    let lookups = context.lookups();
    let entry = |(key, label): (&str, &str)| OptionEntry {
        key: key.to_string(),
        label: label.to_string(),
    };

    let genres = lookups.genres.iter().map(entry).collect();
    let mut artists: Vec<OptionEntry> = Vec::with_capacity(lookups.artists.len() + 1);
    if lookups.artists.name_of(ALL_ARTISTS_KEY).is_none() {
        artists.push(entry((ALL_ARTISTS_KEY, "All Artists")));
    }
    artists.extend(lookups.artists.iter().map(entry));

    DashboardOptions {
        genres,
        artists,
        year_bounds: YearRange::new(context.first_year(), context.last_year()),
        defaults: dashboard.initial_controls(),
    }
}

async fn get_options(State(dashboard): State<GuardedDashboard>) -> impl IntoResponse {
    Json(dashboard_options(&dashboard))
}

async fn post_render(
    State(dashboard): State<GuardedDashboard>,
    Json(controls): Json<Controls>,
) -> impl IntoResponse {
    Json(dashboard.render(&controls))
}

async fn post_event(
    State(dashboard): State<GuardedDashboard>,
    Json(body): Json<EventBody>,
) -> impl IntoResponse {
    metrics::record_event(body.event.input().name());
    Json(dashboard.apply(&body.controls, body.event))
}

pub fn make_app(config: ServerConfig, dashboard: Arc<Dashboard>) -> Result<Router> {
    let state = ServerState::new(config.clone(), dashboard);

    let dashboard_routes: Router = Router::new()
        .route("/options", get(get_options))
        .route("/render", post(post_render))
        .route("/event", post(post_event))
        .with_state(state.clone());

    let home_router: Router = match config.frontend_dir_path {
        Some(frontend_path) => {
            let static_files_service =
                ServeDir::new(frontend_path).append_index_html_on_directories(true);
            Router::new().fallback_service(static_files_service)
        }
        None => Router::new()
            .route("/", get(home))
            .with_state(state.clone()),
    };

    let app: Router = home_router
        .nest("/v1/dashboard", dashboard_routes)
        .layer(middleware::from_fn_with_state(state.clone(), log_requests));

    Ok(app)
}

fn make_metrics_app() -> Router {
    Router::new().route("/metrics", get(metrics::metrics_handler))
}

async fn run_metrics_server(port: u16) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    Ok(axum::serve(listener, make_metrics_app()).await?)
}

pub async fn run_server(dashboard: Arc<Dashboard>, config: ServerConfig) -> Result<()> {
    let port = config.port;
    let metrics_port = config.metrics_port;
    let app = make_app(config, dashboard)?;

    tokio::spawn(async move {
        if let Err(err) = run_metrics_server(metrics_port).await {
            error!("Metrics server stopped: {}", err);
        }
    });

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    info!("Listening on {}", listener.local_addr()?);

    Ok(axum::serve(listener, app).await?)
}
