//! HTTP routes.

mod agent;
mod auto;
mod cancel;
mod media;
mod memory;
mod reports;
mod retrieval;
mod tools;

use crate::state::AppState;
use crate::ws;
use axum::Router;
use axum::routing::{delete, get, post};
use serde_json::json;
use std::sync::Arc;

async fn health() -> axum::Json<serde_json::Value> {
    axum::Json(json!({ "status": "ok", "service": "relay" }))
}

/// Builds the full HTTP `Router`, unauthenticated by construction: there is
/// no OAuth/JWT/rate-limit layer in this deployment shape.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health))
        .route("/api/auto", post(auto::auto))
        .route("/api/chat", post(auto::chat))
        .route("/api/reason", post(auto::reason))
        .route("/api/code", post(auto::code))
        .route("/api/sql", post(auto::sql))
        .route("/api/vision", post(auto::vision))
        .route("/api/debug", post(auto::debug))
        .route("/api/fast", post(auto::fast))
        .route("/api/report", post(auto::report))
        .route("/api/dashboard", post(auto::dashboard))
        .route("/api/dashboard/vanilla", post(auto::dashboard_vanilla))
        .route("/api/chart", post(auto::chart))
        .route("/api/image_prompt", post(auto::image_prompt))
        .route("/api/video_prompt", post(auto::video_prompt))
        .route("/api/research", post(auto::research))
        .route("/api/custom", post(auto::custom))
        .route("/api/cancel", post(cancel::cancel))
        .route("/api/memory/store", post(memory::store))
        .route("/api/memory/entries", get(memory::entries))
        .route("/api/memory/entries/{id}", delete(memory::delete_entry))
        .route("/api/memory/entries/ttl", post(memory::set_ttl))
        .route("/api/memory/entries/purge", post(memory::purge))
        .route("/api/memory/message", post(memory::message))
        .route("/api/memory/context/{userId}", get(memory::context_for_user))
        .route("/api/memory/is-followup", post(memory::is_followup))
        .route("/api/memory/history/{userId}", get(memory::history))
        .route("/api/memory/export/{userId}", get(memory::export))
        .route("/api/memory/{userId}", delete(memory::delete_user))
        .route("/api/tools/python", post(tools::python))
        .route("/api/tools/execute", post(tools::execute))
        .route("/api/tools/analyze", post(tools::analyze))
        .route("/api/tools/summarize", post(tools::summarize))
        .route("/api/tools/sql", post(tools::sql))
        .route("/api/tools/schema", post(tools::schema))
        .route("/api/tools/sympy", post(tools::sympy))
        .route("/api/tools/ingest", post(tools::ingest))
        .route("/api/tools/search", post(tools::search))
        .route("/api/tools/fetch", post(tools::fetch))
        .route("/api/tools/visualize", post(tools::visualize))
        .route("/api/tools/chain", post(tools::chain))
        .route("/api/docs/index", post(retrieval::docs_index))
        .route("/api/docs/query", post(retrieval::docs_query))
        .route("/api/embeddings/index", post(retrieval::embeddings_index))
        .route("/api/embeddings/query", post(retrieval::embeddings_query))
        .route("/api/image", post(media::image))
        .route("/api/video", post(media::video))
        .route("/api/reports/generate", post(reports::generate))
        .route("/api/reports/{reportId}", get(reports::get))
        .route("/api/reports/export/html", post(reports::export_html))
        .route("/api/reports/export/pdf", post(reports::export_pdf))
        .route("/api/agent/run", post(agent::run))
        .route("/ws", get(ws::upgrade))
}
