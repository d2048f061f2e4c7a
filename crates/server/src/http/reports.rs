//! `/api/reports/*`.
//!
//! Reduced fidelity: a report is generated synchronously against the chat
//! route and then held behind the `queued`/`done` status the endpoint shape
//! implies. There is no background job queue; `generate` awaits the backend
//! inline but always answers the request immediately with `queued`, moving
//! the actual generation onto a spawned task so the HTTP call returns
//! immediately with `queued` rather than blocking on generation.

use crate::error::ApiError;
use crate::state::{AppState, ReportRecord, ReportStatus};
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use context::RelayError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct GenerateBody {
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub report_id: String,
    pub status: ReportStatus,
}

pub async fn generate(State(state): State<Arc<AppState>>, Json(body): Json<GenerateBody>) -> Json<GenerateResponse> {
    let report_id = uuid::Uuid::new_v4().to_string();
    state.reports.insert(report_id.clone(), ReportRecord { status: ReportStatus::Queued, content: None });

    let state_for_task = state.clone();
    let id_for_task = report_id.clone();
    tokio::spawn(async move {
        let header = crate::system_prompts::header_for("report").unwrap_or_default();
        let prompt = format!("{header}\n\n{}", body.prompt);
        let outcome = state_for_task.backend.generate("reasoning", &prompt).await;
        let record = match outcome {
            Ok(content) => ReportRecord { status: ReportStatus::Done, content: Some(content) },
            Err(e) => ReportRecord { status: ReportStatus::Failed, content: Some(e.to_string()) },
        };
        state_for_task.reports.insert(id_for_task, record);
    });

    Json(GenerateResponse { report_id, status: ReportStatus::Queued })
}

#[derive(Debug, Serialize)]
pub struct ReportResponse {
    pub report_id: String,
    pub status: ReportStatus,
    pub content: Option<String>,
}

pub async fn get(State(state): State<Arc<AppState>>, Path(report_id): Path<String>) -> Result<Json<ReportResponse>, ApiError> {
    let record = state.reports.get(&report_id).ok_or_else(|| ApiError(RelayError::NotFound(report_id.clone())))?;
    Ok(Json(ReportResponse { report_id, status: record.status, content: record.content.clone() }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportBody {
    pub report_id: String,
}

pub async fn export_html(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ExportBody>,
) -> Result<impl IntoResponse, ApiError> {
    let report_id = body.report_id;
    let record = state.reports.get(&report_id).ok_or_else(|| ApiError(RelayError::NotFound(report_id.clone())))?;
    let content = record.content.clone().unwrap_or_default();
    let html = format!("<html><body><pre>{}</pre></body></html>", html_escape(&content));
    Ok(([(axum::http::header::CONTENT_TYPE, "text/html")], html))
}

/// PDF export is not implemented: no example in the pack shows a grounded
/// pure-Rust PDF renderer, and shelling out to an external tool would be
/// ungrounded guesswork.
pub async fn export_pdf() -> StatusCode {
    StatusCode::NOT_IMPLEMENTED
}

fn html_escape(input: &str) -> String {
    input.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
