//! HTTP server listen settings.

use serde::Deserialize;

fn default_port() -> u16 {
    8080
}

/// Where the relay listens and how it advertises itself to clients that
/// build absolute URLs (e.g. a generated-image link in a report).
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Port to bind, overridden by the `PORT` environment variable.
    pub port: u16,
    /// Base URL used to render absolute links in responses.
    pub base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: default_port(), base_url: "http://localhost:8080".to_string() }
    }
}
