//! `/api/docs/*` and `/api/embeddings/*`.

use crate::error::ApiError;
use crate::state::{AppState, EMBEDDING_MODEL};
use axum::Json;
use axum::extract::State;
use context::RelayError;
use memory::extract_keywords;
use retrieval::RetrievalHit;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const DEFAULT_CHUNK_SIZE: usize = 1000;
const DEFAULT_CHUNK_OVERLAP: usize = 150;

#[derive(Debug, Deserialize)]
pub struct IndexBody {
    pub path: String,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub indexed: bool,
}

pub async fn docs_index(State(state): State<Arc<AppState>>, Json(body): Json<IndexBody>) -> Result<Json<IndexResponse>, ApiError> {
    let keywords = extract_keywords(&body.text);
    state
        .keyword_index
        .index_file(&body.path, keywords, &body.text)
        .await
        .map_err(|e| ApiError(RelayError::Internal(e.to_string())))?;
    Ok(Json(IndexResponse { indexed: true }))
}

#[derive(Debug, Deserialize)]
pub struct QueryBody {
    pub query: String,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    5
}

pub async fn docs_query(State(state): State<Arc<AppState>>, Json(body): Json<QueryBody>) -> Json<Vec<RetrievalHit>> {
    let keywords = extract_keywords(&body.query);
    let hits = state.keyword_index.search(&keywords, body.limit).await;
    Json(
        hits.into_iter()
            .map(|(entry, score)| RetrievalHit { id: format!("kw:{}", entry.path), path: entry.path, text: entry.snippet, score: score as f32 })
            .collect(),
    )
}

pub async fn embeddings_index(
    State(state): State<Arc<AppState>>,
    Json(body): Json<IndexBody>,
) -> Result<Json<IndexResponse>, ApiError> {
    let mut pieces = Vec::new();
    for chunk in retrieval::chunk_text(&body.text, DEFAULT_CHUNK_SIZE, DEFAULT_CHUNK_OVERLAP) {
        let embedding = state
            .backend
            .embed(EMBEDDING_MODEL, &chunk)
            .await
            .map_err(|e| ApiError(RelayError::BackendError(e.to_string())))?;
        pieces.push(embedding);
    }
    let mut i = 0;
    state
        .embedding_index
        .index_file(&body.path, &body.text, DEFAULT_CHUNK_SIZE, DEFAULT_CHUNK_OVERLAP, |_| {
            let embedding = pieces.get(i).cloned().unwrap_or_default();
            i += 1;
            embedding
        })
        .await
        .map_err(|e| ApiError(RelayError::Internal(e.to_string())))?;

    Ok(Json(IndexResponse { indexed: true }))
}

pub async fn embeddings_query(
    State(state): State<Arc<AppState>>,
    Json(body): Json<QueryBody>,
) -> Result<Json<Vec<RetrievalHit>>, ApiError> {
    let embedding =
        state.backend.embed(EMBEDDING_MODEL, &body.query).await.map_err(|e| ApiError(RelayError::BackendError(e.to_string())))?;
    let hits = state.embedding_index.search(&embedding, body.limit).await;
    Ok(Json(
        hits.into_iter()
            .map(|(chunk, score)| RetrievalHit {
                id: format!("emb:{}:{}", chunk.path, chunk.chunk_index),
                path: chunk.path,
                text: chunk.text,
                score,
            })
            .collect(),
    ))
}
