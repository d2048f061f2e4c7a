//! Client for the single LM backend: an
//! HTTP service exposing blocking generation, streamed generation, and
//! embeddings, all addressed by model name.

use crate::error::{GenerationError, Result};
use crate::http_client::http_client;
use futures::Stream;
use futures_util::StreamExt;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub url: Url,
    /// Deadline for receiving response headers.
    pub headers_timeout: Duration,
    /// Deadline for a full non-streaming body.
    pub body_timeout: Duration,
    pub keep_alive: String,
}

#[derive(Debug, Clone)]
pub struct GenerateChunk {
    pub token: String,
    pub done: bool,
}

#[derive(Debug, Deserialize)]
struct BackendChunk {
    #[serde(default)]
    response: String,
    #[serde(default)]
    done: bool,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embedding: Vec<f32>,
}

#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    config: BackendConfig,
}

impl BackendClient {
    pub fn new(config: BackendConfig) -> Self {
        Self { http: http_client(), config }
    }

    /// Blocking (non-streamed) generation, used by tool post-validation's
    /// single reviewer-model pass and by callers that never want partial
    /// output.
    pub async fn generate(&self, model: &str, prompt: &str) -> Result<String> {
        let body = json!({
            "model": model,
            "prompt": prompt,
            "stream": false,
            "keep_alive": self.config.keep_alive,
        });

        let response = self.post("/api/generate", &body, self.config.body_timeout).await?;
        let parsed: BackendChunk = response.json().await.map_err(|e| GenerationError::Decode(e.to_string()))?;

        if let Some(error) = parsed.error {
            return Err(GenerationError::from_backend_body(error));
        }

        Ok(parsed.response)
    }

    /// Streamed generation. The backend emits one newline-delimited JSON
    /// object per chunk; the final chunk carries `done: true`.
    pub async fn generate_stream(
        &self,
        model: &str,
        prompt: &str,
    ) -> Result<impl Stream<Item = Result<GenerateChunk>> + use<>> {
        let body = json!({
            "model": model,
            "prompt": prompt,
            "stream": true,
            "keep_alive": self.config.keep_alive,
        });

        let response = self.post("/api/generate", &body, self.config.headers_timeout).await?;
        Ok(ndjson_chunks(response.bytes_stream()))
    }

    pub async fn embed(&self, model: &str, text: &str) -> Result<Vec<f32>> {
        let body = json!({ "model": model, "prompt": text });
        let response = self.post("/api/embeddings", &body, self.config.body_timeout).await?;
        let parsed: EmbedResponse = response.json().await.map_err(|e| GenerationError::Decode(e.to_string()))?;
        Ok(parsed.embedding)
    }

    async fn post(&self, path: &str, body: &serde_json::Value, timeout: Duration) -> Result<reqwest::Response> {
        let url = self.config.url.join(path).expect("backend paths are static and always valid");

        let response =
            self.http.post(url).json(body).timeout(timeout).send().await.map_err(GenerationError::from_reqwest)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let text = response.text().await.unwrap_or_default();
            return Err(GenerationError::from_backend_status(status, text));
        }

        Ok(response)
    }
}

/// Buffers a byte stream and splits it on newlines, yielding one decoded
/// chunk per complete line. Never blocks waiting for more bytes than a
/// single line needs.
fn ndjson_chunks(
    mut byte_stream: impl Stream<Item = reqwest::Result<bytes::Bytes>> + Unpin,
) -> impl Stream<Item = Result<GenerateChunk>> {
    struct State<S> {
        stream: S,
        buffer: String,
        upstream_done: bool,
    }

    futures::stream::unfold(
        State { stream: byte_stream, buffer: String::new(), upstream_done: false },
        |mut state| async move {
            loop {
                if let Some(pos) = state.buffer.find('\n') {
                    let line = state.buffer[..pos].trim().to_string();
                    state.buffer.drain(..=pos);

                    if line.is_empty() {
                        continue;
                    }

                    return Some(match serde_json::from_str::<BackendChunk>(&line) {
                        Ok(chunk) if chunk.error.is_some() => {
                            (Err(GenerationError::from_backend_body(chunk.error.unwrap())), state)
                        }
                        Ok(chunk) => (Ok(GenerateChunk { token: chunk.response, done: chunk.done }), state),
                        Err(e) => (Err(GenerationError::Decode(e.to_string())), state),
                    });
                }

                if state.upstream_done {
                    return None;
                }

                match state.stream.next().await {
                    Some(Ok(bytes)) => state.buffer.push_str(&String::from_utf8_lossy(&bytes)),
                    Some(Err(e)) => return Some((Err(GenerationError::from_reqwest(e)), state)),
                    None => state.upstream_done = true,
                }
            }
        },
    )
}
