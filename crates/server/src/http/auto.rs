//! `/api/auto` and its specialized aliases.

use crate::error::ApiError;
use crate::pipeline::{self, PipelineEvent};
use crate::request::{AutoRequestBody, build_request};
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoMeta {
    pub route: String,
    pub route_reason: String,
    pub files: Vec<String>,
    pub memory_hits: usize,
    pub auto_files: bool,
    pub memory_requested: bool,
    pub web_used: bool,
    pub rag_sources: usize,
    pub duration_ms: u64,
    pub cache_hit: bool,
}

#[derive(Debug, Serialize)]
pub struct AutoResponse {
    pub model: String,
    pub response: String,
    pub meta: AutoMeta,
}

/// `POST /api/auto`.
pub async fn auto(State(state): State<Arc<AppState>>, Json(body): Json<AutoRequestBody>) -> Result<Json<AutoResponse>, ApiError> {
    run_auto(state, body).await
}

/// Builds a handler for a task alias, which just pre-fills `task` on the
/// body before running the same pipeline as `/api/auto`.
macro_rules! alias_handler {
    ($name:ident, $task:literal) => {
        pub async fn $name(
            State(state): State<Arc<AppState>>,
            Json(mut body): Json<AutoRequestBody>,
        ) -> Result<Json<AutoResponse>, ApiError> {
            if body.task.is_none() {
                body.task = Some($task.to_string());
            }
            run_auto(state, body).await
        }
    };
}

alias_handler!(chat, "chat");
alias_handler!(reason, "reason");
alias_handler!(code, "code");
alias_handler!(sql, "sql");
alias_handler!(vision, "vision");
alias_handler!(debug, "debug");
alias_handler!(fast, "fast");
alias_handler!(report, "report");
alias_handler!(dashboard, "dashboard");
alias_handler!(dashboard_vanilla, "dashboard_vanilla");
alias_handler!(chart, "chart");
alias_handler!(image_prompt, "image_prompt");
alias_handler!(video_prompt, "video_prompt");
alias_handler!(research, "research");
alias_handler!(custom, "custom");

fn route_task_str(task: context::RouteTask) -> String {
    serde_json::to_value(task).ok().and_then(|v| v.as_str().map(str::to_string)).unwrap_or_default()
}

async fn run_auto(state: Arc<AppState>, body: AutoRequestBody) -> Result<Json<AutoResponse>, ApiError> {
    let request_id = uuid::Uuid::new_v4().to_string();
    let request = build_request(&body, request_id.clone());

    let cancel = CancellationToken::new();
    state.cancellations.insert(request_id.clone(), cancel.clone());

    let start = Instant::now();
    let mut done: Option<pipeline::DoneInfo> = None;
    let mut error = None;
    let memory_requested = body.user_id.is_some();

    pipeline::run(&state, &request, cancel, |event| match event {
        PipelineEvent::Done(info) => done = Some(*info),
        PipelineEvent::Error(e) => error = Some(e),
        _ => {}
    })
    .await;

    state.cancellations.remove(&request_id);

    if let Some(e) = error {
        return Err(ApiError(e));
    }

    let info = done.ok_or_else(|| ApiError(context::RelayError::Internal("pipeline finished without a result".to_string())))?;

    Ok(Json(AutoResponse {
        model: info.model,
        response: info.envelope.render(),
        meta: AutoMeta {
            route: route_task_str(info.route.task),
            route_reason: info.route.rationale,
            files: info.assembled.files_used,
            memory_hits: info.assembled.memory_hits,
            auto_files: request.flags.auto_files,
            memory_requested,
            web_used: info.assembled.web_used,
            rag_sources: info.assembled.rag_sources,
            duration_ms: start.elapsed().as_millis() as u64,
            cache_hit: info.cache_hit,
        },
    }))
}
