//! Ollama-shaped LM backend settings.

use serde::Deserialize;

fn default_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_headers_timeout_ms() -> u64 {
    10_000
}

fn default_body_timeout_ms() -> u64 {
    120_000
}

fn default_keep_alive() -> String {
    "5m".to_string()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackendConfig {
    /// Base URL of the LM backend's HTTP API.
    pub url: String,
    /// Deadline for receiving response headers, in milliseconds.
    pub headers_timeout_ms: u64,
    /// Deadline for a full non-streaming body, in milliseconds.
    pub body_timeout_ms: u64,
    /// Forwarded to the backend's `keep_alive` field on every request.
    pub keep_alive: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            headers_timeout_ms: default_headers_timeout_ms(),
            body_timeout_ms: default_body_timeout_ms(),
            keep_alive: default_keep_alive(),
        }
    }
}
