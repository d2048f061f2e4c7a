//! Adapts [`generation::BackendClient`] to the `tools` crate's
//! backend-agnostic [`tools::Generator`] trait, the way `web::SearchEngine`
//! adapters decouple `web` from any one search vendor.

use generation::BackendClient;
use tools::{Generator, Result as ToolResult, ToolError};

pub struct BackendGenerator {
    backend: BackendClient,
    model: String,
}

impl BackendGenerator {
    pub fn new(backend: BackendClient, model: String) -> Self {
        Self { backend, model }
    }
}

#[async_trait::async_trait]
impl Generator for BackendGenerator {
    async fn generate(&self, prompt: &str) -> ToolResult<String> {
        self.backend.generate(&self.model, prompt).await.map_err(|e| ToolError::SandboxError(e.to_string()))
    }
}
