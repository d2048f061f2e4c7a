//! `/api/tools/*`.

use crate::error::ApiError;
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use context::RelayError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tools::{ChainStep, Run, Tool, ToolArgs, render_chain_context, run_chain};

fn require_enabled(state: &AppState) -> Result<(), ApiError> {
    if state.config.tools.enabled { Ok(()) } else { Err(ApiError(RelayError::ToolsDisabled)) }
}

#[derive(Debug, Serialize)]
pub struct ToolOutput {
    pub output: String,
}

#[derive(Debug, Deserialize)]
pub struct ScriptBody {
    pub code: String,
}

pub async fn python(State(state): State<Arc<AppState>>, Json(body): Json<ScriptBody>) -> Result<Json<ToolOutput>, ApiError> {
    run_one(&state, Tool::Python, ToolArgs::Script { source: body.code }).await
}

pub async fn sympy(State(state): State<Arc<AppState>>, Json(body): Json<ScriptBody>) -> Result<Json<ToolOutput>, ApiError> {
    run_one(&state, Tool::Sympy, ToolArgs::Script { source: body.code }).await
}

pub async fn analyze(State(state): State<Arc<AppState>>, Json(body): Json<ScriptBody>) -> Result<Json<ToolOutput>, ApiError> {
    run_one(&state, Tool::Analyze, ToolArgs::Text { input: body.code }).await
}

#[derive(Debug, Deserialize)]
pub struct TextBody {
    pub text: String,
}

pub async fn summarize(State(state): State<Arc<AppState>>, Json(body): Json<TextBody>) -> Result<Json<ToolOutput>, ApiError> {
    run_one(&state, Tool::Summarize, ToolArgs::Text { input: body.text }).await
}

pub async fn visualize(State(state): State<Arc<AppState>>, Json(body): Json<TextBody>) -> Result<Json<ToolOutput>, ApiError> {
    run_one(&state, Tool::Visualize, ToolArgs::Text { input: body.text }).await
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SqlBody {
    pub db_path: String,
    pub query: String,
    #[serde(default)]
    pub allow_write: bool,
}

pub async fn sql(State(state): State<Arc<AppState>>, Json(body): Json<SqlBody>) -> Result<Json<ToolOutput>, ApiError> {
    run_one(&state, Tool::Sql, ToolArgs::Sql { db_path: body.db_path, query: body.query, allow_write: body.allow_write }).await
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaBody {
    pub db_path: String,
}

pub async fn schema(State(state): State<Arc<AppState>>, Json(body): Json<SchemaBody>) -> Result<Json<ToolOutput>, ApiError> {
    run_one(&state, Tool::SqlSchema, ToolArgs::Sql { db_path: body.db_path, query: String::new(), allow_write: false }).await
}

#[derive(Debug, Deserialize)]
pub struct PathBody {
    pub path: String,
}

pub async fn ingest(State(state): State<Arc<AppState>>, Json(body): Json<PathBody>) -> Result<Json<ToolOutput>, ApiError> {
    run_one(&state, Tool::Ingest, ToolArgs::Ingest { path: body.path }).await
}

#[derive(Debug, Deserialize)]
pub struct QueryBody {
    pub query: String,
}

pub async fn search(State(state): State<Arc<AppState>>, Json(body): Json<QueryBody>) -> Result<Json<ToolOutput>, ApiError> {
    run_one(&state, Tool::Search, ToolArgs::Text { input: body.query }).await
}

#[derive(Debug, Deserialize)]
pub struct UrlBody {
    pub url: String,
}

pub async fn fetch(State(state): State<Arc<AppState>>, Json(body): Json<UrlBody>) -> Result<Json<ToolOutput>, ApiError> {
    run_one(&state, Tool::Fetch, ToolArgs::Text { input: body.url }).await
}

#[derive(Debug, Deserialize)]
pub struct ExecuteBody {
    pub tool: String,
    pub args: String,
}

/// Generic dispatch by tool name, for callers that don't want a
/// per-tool-shaped endpoint.
pub async fn execute(State(state): State<Arc<AppState>>, Json(body): Json<ExecuteBody>) -> Result<Json<ToolOutput>, ApiError> {
    require_enabled(&state)?;
    let tool = Tool::from_name(&body.tool).ok_or_else(|| ApiError(RelayError::NotFound(body.tool.clone())))?;

    let args = match tool {
        Tool::Python | Tool::Js | Tool::Ts | Tool::Sympy => ToolArgs::Script { source: body.args },
        Tool::Ingest => ToolArgs::Ingest { path: body.args },
        Tool::Sql | Tool::SqlSchema => ToolArgs::Sql { db_path: body.args, query: String::new(), allow_write: false },
        _ => ToolArgs::Text { input: body.args },
    };

    run_one(&state, tool, args).await
}

#[derive(Debug, Deserialize)]
pub struct ChainBody {
    pub steps: Vec<ChainStepBody>,
}

#[derive(Debug, Deserialize)]
pub struct ChainStepBody {
    pub name: String,
    pub args: String,
}

#[derive(Debug, Serialize)]
pub struct ChainResponse {
    pub steps: Vec<ToolOutput>,
    pub context: String,
}

pub async fn chain(State(state): State<Arc<AppState>>, Json(body): Json<ChainBody>) -> Result<Json<ChainResponse>, ApiError> {
    require_enabled(&state)?;

    let mut steps = Vec::with_capacity(body.steps.len());
    for step in body.steps {
        let tool = Tool::from_name(&step.name).ok_or_else(|| ApiError(RelayError::NotFound(step.name.clone())))?;
        let args = match tool {
            Tool::Python | Tool::Js | Tool::Ts | Tool::Sympy => ToolArgs::Script { source: step.args },
            Tool::Ingest => ToolArgs::Ingest { path: step.args },
            Tool::Sql | Tool::SqlSchema => ToolArgs::Sql { db_path: step.args, query: String::new(), allow_write: false },
            _ => ToolArgs::Text { input: step.args },
        };
        steps.push(ChainStep { tool, args });
    }

    let ctx = state.tool_context();
    let results = run_chain(steps, &ctx).await;
    let context = render_chain_context(&results);
    let steps = results.into_iter().map(|r| ToolOutput { output: r.output }).collect();

    Ok(Json(ChainResponse { steps, context }))
}

async fn run_one(state: &AppState, tool: Tool, args: ToolArgs) -> Result<Json<ToolOutput>, ApiError> {
    require_enabled(state)?;
    let ctx = state.tool_context();
    let output = tool.run(args, &ctx).await.map_err(RelayError::from)?;
    Ok(Json(ToolOutput { output }))
}
