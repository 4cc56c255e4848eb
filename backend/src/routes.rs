//! HTTP handlers.

use axum::{
    extract::{rejection::QueryRejection, ws::WebSocketUpgrade, Query, State},
    http::header,
    response::{Html, IntoResponse, Response},
    Json,
};
use axum_extra::{headers::UserAgent, TypedHeader};
use perf_core::plot::PlotRenderer;
use perf_core::reference::{formula_reference, FormulaInfo};
use perf_core::{evaluate, CalculatorInputs, CalculatorReport};
use std::sync::Arc;
use tracing::info;

use crate::error::ServerError;
use crate::session::{handle_socket, plot_series};
use crate::{page, AppState};

pub async fn root() -> Html<&'static str> {
    Html(page::INDEX_HTML)
}

pub async fn health() -> &'static str {
    "ok"
}

pub async fn formulas() -> Json<Vec<FormulaInfo>> {
    Json(formula_reference())
}

/// Evaluate a JSON body of form values; an empty body means form defaults
pub async fn evaluate_form(body: String) -> Result<Json<CalculatorReport>, ServerError> {
    let inputs = if body.trim().is_empty() {
        CalculatorInputs::default()
    } else {
        CalculatorInputs::from_json(&body)?
    };
    Ok(Json(evaluate(&inputs)))
}

fn render_plot(
    name: &str,
    state: &AppState,
    query: Result<Query<CalculatorInputs>, QueryRejection>,
) -> Result<Response, ServerError> {
    let Query(inputs) = query.map_err(|e| ServerError::BadRequest {
        message: e.body_text(),
    })?;
    let series = plot_series(name, &inputs)?;
    let svg = state.renderer.render(&series)?;
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response())
}

pub async fn amdahl_plot(
    State(state): State<Arc<AppState>>,
    query: Result<Query<CalculatorInputs>, QueryRejection>,
) -> Result<Response, ServerError> {
    render_plot("amdahl", &state, query)
}

pub async fn efficiency_plot(
    State(state): State<Arc<AppState>>,
    query: Result<Query<CalculatorInputs>, QueryRejection>,
) -> Result<Response, ServerError> {
    render_plot("efficiency", &state, query)
}

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    user_agent: Option<TypedHeader<UserAgent>>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let agent = user_agent
        .map(|TypedHeader(ua)| ua.as_str().to_string())
        .unwrap_or_else(|| "unknown client".to_string());
    info!("WebSocket upgrade from {}", agent);
    ws.on_upgrade(|socket| handle_socket(socket, state))
}
