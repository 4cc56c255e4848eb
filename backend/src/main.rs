mod config;
mod error;
mod page;
mod routes;
mod session;

use axum::{
    routing::{get, post},
    Router,
};
use clap::Parser;
use perf_core::SvgRenderer;
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::info;

use crate::config::{Cli, ServerConfig};
use crate::error::ServerError;

// Application State
pub struct AppState {
    pub config: ServerConfig,
    pub renderer: SvgRenderer,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Result<Self, ServerError> {
        let renderer = config.renderer();
        renderer
            .validate()
            .map_err(|e| ServerError::Config(format!("plot canvas: {}", e)))?;
        Ok(Self { config, renderer })
    }
}

pub fn app(state: Arc<AppState>) -> Router {
    let mut router = Router::new()
        .route("/", get(routes::root))
        .route("/health", get(routes::health))
        .route("/api/formulas", get(routes::formulas))
        .route("/api/evaluate", post(routes::evaluate_form))
        .route("/plot/amdahl.svg", get(routes::amdahl_plot))
        .route("/plot/efficiency.svg", get(routes::efficiency_plot))
        .route("/ws", get(routes::ws_handler));

    if let Some(dir) = &state.config.static_dir {
        info!("Serving static files from {}", dir.display());
        router = router.nest_service("/static", ServeDir::new(dir));
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}


#[tokio::main]
async fn main() -> Result<(), ServerError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from(Cli::parse());
    let addr = config.addr();
    info!(
        "perf-core {} with {}x{} plots",
        perf_core::version(),
        config.plot_width,
        config.plot_height
    );

    let shared_state = Arc::new(AppState::new(config)?);
    let app = app(shared_state);

    info!("listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
