//! `POST /api/cancel`.

use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelBody {
    pub request_id: String,
}

#[derive(Debug, Serialize)]
pub struct CancelResponse {
    pub status: &'static str,
}

pub async fn cancel(State(state): State<Arc<AppState>>, Json(body): Json<CancelBody>) -> Json<CancelResponse> {
    match state.cancellations.get(&body.request_id) {
        Some(token) => {
            token.cancel();
            Json(CancelResponse { status: "cancelled" })
        }
        None => Json(CancelResponse { status: "not_found" }),
    }
}
