//! The summarize/analyze/visualize tools hand their input to a model pass
//! rather than a sandbox; this trait keeps `tools` decoupled from the
//! `generation` crate the way `web::SearchEngine` decouples `web` from any
//! one search backend. The server wires a concrete adapter around
//! `generation::BackendClient`.

use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}
