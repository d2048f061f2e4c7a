//! `/api/memory/*`.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use context::RelayError;
use memory::{extract_keywords, MemoryEntry};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreBody {
    pub user_id: String,
    pub team_id: Option<String>,
    pub prompt: String,
    pub summary: String,
    #[serde(default = "default_entry_type")]
    pub entry_type: String,
}

fn default_entry_type() -> String {
    "note".to_string()
}

pub async fn store(State(state): State<Arc<AppState>>, Json(body): Json<StoreBody>) -> Result<Json<MemoryEntry>, ApiError> {
    let now = jiff::Timestamp::now();
    let entry =
        MemoryEntry::new(uuid::Uuid::new_v4().to_string(), &body.prompt, body.summary, body.user_id, body.team_id, body.entry_type, None, now);
    state.memory.save_entry(entry.clone()).await.map_err(|e| ApiError(RelayError::Internal(e.to_string())))?;
    Ok(Json(entry))
}

#[derive(Debug, Deserialize)]
pub struct ScopeQuery {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "teamId")]
    pub team_id: Option<String>,
}

pub async fn entries(State(state): State<Arc<AppState>>, Query(query): Query<ScopeQuery>) -> Json<Vec<MemoryEntry>> {
    Json(state.memory.list(&query.user_id, query.team_id.as_deref()).await)
}

pub async fn delete_entry(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    let removed = state.memory.delete(&id).await.map_err(|e| ApiError(RelayError::Internal(e.to_string())))?;
    if removed { Ok(StatusCode::NO_CONTENT) } else { Err(ApiError(RelayError::NotFound(id))) }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TtlBody {
    pub user_id: String,
    pub team_id: Option<String>,
    pub ttl_days: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct UpdatedCount {
    pub updated: usize,
}

pub async fn set_ttl(State(state): State<Arc<AppState>>, Json(body): Json<TtlBody>) -> Result<Json<UpdatedCount>, ApiError> {
    use jiff::ToSpan;
    let now = jiff::Timestamp::now();
    let new_expiry = body.ttl_days.and_then(|days| now.checked_add(days.days()).ok());
    let updated = state
        .memory
        .set_ttl_bulk(&body.user_id, body.team_id.as_deref(), new_expiry)
        .await
        .map_err(|e| ApiError(RelayError::Internal(e.to_string())))?;
    Ok(Json(UpdatedCount { updated }))
}

#[derive(Debug, Serialize)]
pub struct PurgedCount {
    pub purged: usize,
}

pub async fn purge(State(state): State<Arc<AppState>>) -> Result<Json<PurgedCount>, ApiError> {
    let now = jiff::Timestamp::now();
    let purged = state.memory.purge_expired(now).await.map_err(|e| ApiError(RelayError::Internal(e.to_string())))?;
    Ok(Json(PurgedCount { purged }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageBody {
    pub user_id: String,
    pub role: context::Role,
    pub content: String,
}

pub async fn message(State(state): State<Arc<AppState>>, Json(body): Json<MessageBody>) -> StatusCode {
    state.conversations.push(
        &body.user_id,
        context::ConversationMessage {
            role: body.role,
            content: body.content,
            timestamp: jiff::Timestamp::now(),
            intent: None,
            quality_score: None,
            code_language: None,
        },
    );
    StatusCode::NO_CONTENT
}

#[derive(Debug, Deserialize)]
pub struct ContextQuery {
    pub prompt: Option<String>,
    #[serde(rename = "teamId")]
    pub team_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ContextResponse {
    pub entries: Vec<MemoryEntry>,
    pub history: Vec<context::ConversationMessage>,
}

pub async fn context_for_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Query(query): Query<ContextQuery>,
) -> Json<ContextResponse> {
    let keywords = query.prompt.as_deref().map(extract_keywords).unwrap_or_default();
    let entries = state.memory.recall(&user_id, query.team_id.as_deref(), &keywords, None, 4).await;
    let history = state.conversations.history(&user_id);
    Json(ContextResponse { entries, history })
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowupBody {
    pub user_id: String,
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct FollowupResponse {
    pub is_followup: bool,
}

/// A prompt is treated as a follow-up when the user has prior conversation
/// history and the new prompt shares at least one keyword with the most
/// recent turn.
pub async fn is_followup(State(state): State<Arc<AppState>>, Json(body): Json<FollowupBody>) -> Json<FollowupResponse> {
    let history = state.conversations.history(&body.user_id);
    let is_followup = memory::is_followup(&body.prompt, history.last().map(|m| m.content.as_str()));
    Json(FollowupResponse { is_followup })
}

pub async fn history(State(state): State<Arc<AppState>>, Path(user_id): Path<String>) -> Json<Vec<context::ConversationMessage>> {
    Json(state.conversations.history(&user_id))
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "json".to_string()
}

pub async fn export(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Query(query): Query<ExportQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let entries = state.memory.list(&user_id, None).await;

    let body = match query.format.as_str() {
        "text" => entries.iter().map(|e| format!("{}\n{}", e.prompt, e.summary)).collect::<Vec<_>>().join("\n\n"),
        "markdown" => entries.iter().map(|e| format!("- **{}**: {}", e.prompt, e.summary)).collect::<Vec<_>>().join("\n"),
        "csv" => {
            let mut out = String::from("id,prompt,summary,created_at\n");
            for e in &entries {
                out.push_str(&format!("{},{:?},{:?},{}\n", e.id, e.prompt, e.summary, e.created_at));
            }
            out
        }
        "json" => serde_json::to_string_pretty(&entries).map_err(|e| ApiError(RelayError::Internal(e.to_string())))?,
        other => return Err(ApiError(RelayError::BadRequest(format!("unknown export format: {other}")))),
    };

    Ok(body)
}

pub async fn delete_user(State(state): State<Arc<AppState>>, Path(user_id): Path<String>) -> Result<Json<UpdatedCount>, ApiError> {
    let entries = state.memory.list(&user_id, None).await;
    let mut updated = 0;
    for entry in entries {
        if state.memory.delete(&entry.id).await.map_err(|e| ApiError(RelayError::Internal(e.to_string())))? {
            updated += 1;
        }
    }
    Ok(Json(UpdatedCount { updated }))
}
