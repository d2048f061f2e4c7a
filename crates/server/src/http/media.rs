//! `/api/image` and `/api/video`.
//!
//! Reduced fidelity: image generation proxies to a configured
//! AUTOMATIC1111-compatible API and returns its raw base64 payload; video
//! generation (ffmpeg assembly of generated frames) is not implemented, since
//! no example in the pack shows a grounded way to drive `ffmpeg` from Rust.
//! Both require `config.media` to be set, or fail with `upstream_unavailable`.

use crate::error::ApiError;
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use context::RelayError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct ImageBody {
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct ImageResponse {
    pub image_base64: String,
}

pub async fn image(State(state): State<Arc<AppState>>, Json(body): Json<ImageBody>) -> Result<Json<ImageResponse>, ApiError> {
    let base_url = state
        .config
        .media
        .a1111_url
        .as_ref()
        .ok_or_else(|| ApiError(RelayError::UpstreamUnavailable("no image generation backend configured".to_string())))?;

    let response = state
        .http_client
        .post(format!("{base_url}/sdapi/v1/txt2img"))
        .json(&serde_json::json!({ "prompt": body.prompt }))
        .send()
        .await
        .map_err(|e| ApiError(RelayError::UpstreamUnavailable(e.to_string())))?;

    let payload: serde_json::Value =
        response.json().await.map_err(|e| ApiError(RelayError::UpstreamUnavailable(e.to_string())))?;

    let image_base64 = payload["images"][0]
        .as_str()
        .ok_or_else(|| ApiError(RelayError::UpstreamUnavailable("image backend returned no image".to_string())))?
        .to_string();

    Ok(Json(ImageResponse { image_base64 }))
}

#[derive(Debug, Deserialize)]
pub struct VideoBody {
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct VideoResponse {
    pub status: String,
}

pub async fn video(State(_state): State<Arc<AppState>>, Json(_body): Json<VideoBody>) -> Result<Json<VideoResponse>, ApiError> {
    Err(ApiError(RelayError::UpstreamUnavailable("video generation is not implemented".to_string())))
}
