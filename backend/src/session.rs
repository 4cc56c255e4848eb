//! WebSocket calculator session.
//!
//! Text protocol: the client sends `COMMAND` or `COMMAND:payload`, the server
//! answers with `KIND_UPDATE:json` frames.

use axum::extract::ws::{Message, WebSocket};
use futures::{sink::SinkExt, stream::StreamExt};
use perf_core::plot::{LineSeries, PlotRenderer, SvgRenderer};
use perf_core::reference::formula_reference;
use perf_core::{evaluate, CalculatorInputs, FormulaError, FormulaResult};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info, warn, Instrument};
use uuid::Uuid;

use crate::AppState;

/// Format an error as a JSON message for the frontend
pub fn format_error(code: &str, message: &str, severity: &str) -> String {
    format!(
        "ERROR_UPDATE:{}",
        json!({
            "code": code,
            "message": message,
            "severity": severity
        })
    )
}

fn formula_error(e: &FormulaError) -> String {
    format_error(e.code(), &e.to_string(), "error")
}

fn parse_inputs(payload: &str) -> FormulaResult<CalculatorInputs> {
    if payload.trim().is_empty() {
        Ok(CalculatorInputs::default())
    } else {
        CalculatorInputs::from_json(payload)
    }
}

fn report_update(inputs: &CalculatorInputs) -> String {
    let report = evaluate(inputs);
    if report.has_errors() {
        debug!("Report contains panel errors");
    }
    let json = serde_json::to_string(&report).unwrap_or("{}".into());
    format!("REPORT_UPDATE:{}", json)
}

fn formulas_update() -> String {
    let json = serde_json::to_string(&formula_reference()).unwrap_or("[]".into());
    format!("FORMULAS_UPDATE:{}", json)
}

/// Pick the series for a named plot
pub fn plot_series(name: &str, inputs: &CalculatorInputs) -> FormulaResult<LineSeries> {
    match name {
        "amdahl" => inputs.amdahl_series(),
        "efficiency" => inputs.efficiency_series(),
        other => Err(FormulaError::InvalidArgument(format!(
            "unknown plot '{}'",
            other
        ))),
    }
}

fn plot_update(name: &str, payload: &str, renderer: &SvgRenderer) -> String {
    let svg = parse_inputs(payload)
        .and_then(|inputs| plot_series(name, &inputs))
        .and_then(|series| renderer.render(&series));

    match svg {
        Ok(svg) => format!("PLOT_UPDATE:{}", json!({ "name": name, "svg": svg })),
        Err(e) => {
            warn!("Plot '{}' failed: {}", name, e);
            formula_error(&e)
        }
    }
}

/// Dispatch one text command and return the frames to send back
pub fn handle_command(text: &str, renderer: &SvgRenderer) -> Vec<String> {
    let (command, payload) = text.split_once(':').unwrap_or((text, ""));

    match command {
        "FORMULAS" => vec![formulas_update()],
        "EVALUATE" => match parse_inputs(payload) {
            Ok(inputs) => vec![report_update(&inputs)],
            Err(e) => {
                warn!("Failed to parse EVALUATE payload: {}", e);
                vec![formula_error(&e)]
            }
        },
        "PLOT" => {
            // Format: PLOT:name or PLOT:name:{inputs}
            let (name, inputs) = payload.split_once(':').unwrap_or((payload, ""));
            vec![plot_update(name, inputs, renderer)]
        }
        _ => {
            warn!("Unknown command: {}", command);
            vec![format_error(
                "UNKNOWN_COMMAND",
                &format!("Unknown command: {}", command),
                "warning",
            )]
        }
    }
}

pub async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let session_id = Uuid::new_v4();
    let span = tracing::info_span!("session", id = %session_id);
    run_session(socket, state).instrument(span).await;
}

async fn run_session(socket: WebSocket, state: Arc<AppState>) {
    info!("Client connected");
    let (mut sender, mut receiver) = socket.split();

    // Initial sidebar and default report
    for frame in [formulas_update(), report_update(&CalculatorInputs::default())] {
        if sender.send(Message::Text(frame)).await.is_err() {
            return;
        }
    }

    while let Some(msg) = receiver.next().await {
        let msg = if let Ok(msg) = msg {
            msg
        } else {
            break;
        };

        match msg {
            Message::Text(text) => {
                debug!("Received message: {}", text);
                for frame in handle_command(&text, &state.renderer) {
                    if sender.send(Message::Text(frame)).await.is_err() {
                        info!("Client went away mid-response");
                        return;
                    }
                }
            }
            Message::Close(_) => break,
            _ => {}
        }
    }

    info!("Client disconnected");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(frame: &str, prefix: &str) -> serde_json::Value {
        let json = frame
            .strip_prefix(prefix)
            .unwrap_or_else(|| panic!("expected {} frame, got {}", prefix, frame));
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_formulas_command() {
        let frames = handle_command("FORMULAS", &SvgRenderer::default());
        assert_eq!(frames.len(), 1);
        let value = payload(&frames[0], "FORMULAS_UPDATE:");
        assert_eq!(value[0]["id"], "amdahl");
    }

    #[test]
    fn test_evaluate_with_partial_inputs() {
        let frames = handle_command(r#"EVALUATE:{"k": 4, "p": 1}"#, &SvgRenderer::default());
        let value = payload(&frames[0], "REPORT_UPDATE:");
        assert_eq!(value["pipeline"]["status"], "ok");
        assert_eq!(value["pipeline"]["efficiency"], 1.0);
    }

    #[test]
    fn test_evaluate_without_payload_uses_defaults() {
        let frames = handle_command("EVALUATE", &SvgRenderer::default());
        let value = payload(&frames[0], "REPORT_UPDATE:");
        let ratio = value["simd"]["ratio"].as_f64().unwrap();
        assert!((ratio - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_evaluate_malformed_json() {
        let frames = handle_command("EVALUATE:{not json", &SvgRenderer::default());
        let value = payload(&frames[0], "ERROR_UPDATE:");
        assert_eq!(value["code"], "INVALID_ARGUMENT");
        assert_eq!(value["severity"], "error");
    }

    #[test]
    fn test_plot_command() {
        let frames = handle_command(
            r#"PLOT:efficiency:{"speedups": "1, 2", "processors": "1, 4"}"#,
            &SvgRenderer::default(),
        );
        let value = payload(&frames[0], "PLOT_UPDATE:");
        assert_eq!(value["name"], "efficiency");
        assert!(value["svg"].as_str().unwrap().starts_with("<svg"));
    }

    #[test]
    fn test_plot_defaults_and_unknown_name() {
        let frames = handle_command("PLOT:amdahl", &SvgRenderer::default());
        assert!(frames[0].starts_with("PLOT_UPDATE:"));

        let frames = handle_command("PLOT:histogram", &SvgRenderer::default());
        assert!(frames[0].starts_with("ERROR_UPDATE:"));
    }

    #[test]
    fn test_unknown_command_is_warning() {
        let frames = handle_command("REGEN", &SvgRenderer::default());
        let value = payload(&frames[0], "ERROR_UPDATE:");
        assert_eq!(value["code"], "UNKNOWN_COMMAND");
        assert_eq!(value["severity"], "warning");
    }
}
