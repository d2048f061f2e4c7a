//! `POST /api/agent/run`.
//!
//! Reduced fidelity: a single planner pass asks the backend for a numbered
//! plan, then one executor pass per step runs that step's prompt back
//! through `/api/auto`'s pipeline. There is no tool-selection loop beyond
//! what the pipeline already does per step.

use crate::error::ApiError;
use crate::pipeline::{self, PipelineEvent};
use crate::request::{build_request, AutoRequestBody};
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use context::RelayError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Deserialize)]
pub struct AgentBody {
    pub goal: String,
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AgentStepResult {
    pub step: String,
    pub output: String,
}

#[derive(Debug, Serialize)]
pub struct AgentResponse {
    pub plan: Vec<String>,
    pub steps: Vec<AgentStepResult>,
}

pub async fn run(State(state): State<Arc<AppState>>, Json(body): Json<AgentBody>) -> Result<Json<AgentResponse>, ApiError> {
    let planning_prompt =
        format!("Break the following goal into a short numbered plan of concrete steps, one per line:\n\n{}", body.goal);
    let plan_text = state
        .backend
        .generate("reasoning", &planning_prompt)
        .await
        .map_err(|e| ApiError(RelayError::BackendError(e.to_string())))?;

    let plan: Vec<String> = plan_text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| line.trim_start_matches(|c: char| c.is_ascii_digit() || c == '.' || c == ')' || c == ' ').to_string())
        .filter(|line| !line.is_empty())
        .collect();

    let mut steps = Vec::with_capacity(plan.len());
    for step in &plan {
        let auto_body = AutoRequestBody {
            prompt: step.clone(),
            task: None,
            model: None,
            fast: false,
            auto_files: false,
            auto_web: false,
            file_paths: Vec::new(),
            image_description: None,
            user_id: body.user_id.clone(),
            team_id: None,
            team_mode: false,
            use_doc_index: false,
            use_embeddings: false,
            language: None,
            response_spec: None,
            temperature: None,
            max_tokens: None,
        };
        let request = build_request(&auto_body, uuid::Uuid::new_v4().to_string());

        let mut output = String::new();
        pipeline::run(&state, &request, CancellationToken::new(), |event| {
            if let PipelineEvent::Done(info) = event {
                output = info.envelope.render();
            }
        })
        .await;

        steps.push(AgentStepResult { step: step.clone(), output });
    }

    Ok(Json(AgentResponse { plan, steps }))
}
