//! The single WebSocket streaming path.

use crate::pipeline::{self, PipelineEvent};
use crate::request::{AutoRequestBody, build_request};
use crate::state::AppState;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use context::IntentVerdict;
use futures_util::{SinkExt, StreamExt};
use generation::Phase;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Deserialize)]
pub struct WsRequestBody {
    #[serde(flatten)]
    pub auto: AutoRequestBody,
    pub request_id: String,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WsEvent {
    IntentClassification { intent: IntentVerdict },
    ReasoningPhase { phase: &'static str },
    WebSearchResults { used: bool },
    Token { token: String },
    ModelFallback { reason: &'static str },
    ModelRetryStart { reason: &'static str },
    ModelRetryDone,
    ModelRetryFailed { message: String },
    Done { model: String, route: String, response: String, meta: DoneMeta },
    Error { kind: String, message: String },
}

#[derive(Debug, Serialize)]
pub struct DoneMeta {
    pub duration_ms: u64,
    pub model: String,
    pub tool_names: Vec<String>,
    pub tool_timings_ms: Vec<u64>,
    pub formatting: &'static str,
}

fn phase_str(phase: Phase) -> &'static str {
    match phase {
        Phase::Understanding => "understanding",
        Phase::Planning => "planning",
        Phase::Research => "research",
        Phase::Reasoning => "reasoning",
        Phase::Generating => "generating",
    }
}

fn shape_str(shape: formatter::ResponseShape) -> &'static str {
    match shape {
        formatter::ResponseShape::Text => "text",
        formatter::ResponseShape::Table => "table",
        formatter::ResponseShape::List => "list",
        formatter::ResponseShape::Ranking => "ranking",
        formatter::ResponseShape::Chart => "chart",
    }
}

pub async fn upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();

    while let Some(Ok(message)) = receiver.next().await {
        let Message::Text(text) = message else { continue };

        let body: WsRequestBody = match serde_json::from_str(&text) {
            Ok(body) => body,
            Err(e) => {
                send_event(&mut sender, &WsEvent::Error { kind: "bad_request".to_string(), message: e.to_string() }).await;
                continue;
            }
        };

        let request_id = body.request_id.clone();
        let request = build_request(&body.auto, request_id.clone());
        let cancel = CancellationToken::new();
        state.cancellations.insert(request_id.clone(), cancel.clone());

        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<WsEvent>();
        let start = Instant::now();

        let state_for_run = state.clone();
        let run_handle = tokio::spawn(async move {
            pipeline::run(&state_for_run, &request, cancel, |event| {
                let ws_event = match event {
                    PipelineEvent::IntentClassification(intent) => WsEvent::IntentClassification { intent },
                    PipelineEvent::ReasoningPhase(phase) => WsEvent::ReasoningPhase { phase: phase_str(phase) },
                    PipelineEvent::WebSearchResults { used } => WsEvent::WebSearchResults { used },
                    PipelineEvent::Token(token) => WsEvent::Token { token },
                    PipelineEvent::ModelFallback { reason } => WsEvent::ModelFallback { reason },
                    PipelineEvent::ModelRetryStart { reason } => WsEvent::ModelRetryStart { reason },
                    PipelineEvent::ModelRetryDone => WsEvent::ModelRetryDone,
                    PipelineEvent::ModelRetryFailed { message } => WsEvent::ModelRetryFailed { message },
                    PipelineEvent::Done(info) => {
                        let shape = formatter::detect(&info.envelope.result);
                        WsEvent::Done {
                            model: info.model.clone(),
                            route: serde_json::to_value(info.route.task).ok().and_then(|v| v.as_str().map(str::to_string)).unwrap_or_default(),
                            response: info.envelope.render(),
                            meta: DoneMeta {
                                duration_ms: start.elapsed().as_millis() as u64,
                                model: info.model,
                                tool_names: Vec::new(),
                                tool_timings_ms: Vec::new(),
                                formatting: shape_str(shape),
                            },
                        }
                    }
                    PipelineEvent::Error(error) => WsEvent::Error { kind: error.kind().to_string(), message: error.to_string() },
                };
                let _ = tx.send(ws_event);
            })
            .await;
        });

        while let Some(event) = rx.recv().await {
            let is_terminal = matches!(event, WsEvent::Done { .. } | WsEvent::Error { .. });
            send_event(&mut sender, &event).await;
            if is_terminal {
                break;
            }
        }

        let _ = run_handle.await;
        state.cancellations.remove(&request_id);
    }
}

async fn send_event(sender: &mut futures_util::stream::SplitSink<WebSocket, Message>, event: &WsEvent) {
    if let Ok(text) = serde_json::to_string(event) {
        let _ = sender.send(Message::Text(text.into())).await;
    }
}
