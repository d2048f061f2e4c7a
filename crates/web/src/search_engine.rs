//! One shared trait implemented by every search backend adapter, tried in a
//! fixed fallback order by [`crate::search`].

use crate::error::Result;
use async_trait::async_trait;

#[derive(Debug, Clone, serde::Serialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

#[async_trait]
pub trait SearchEngine: Send + Sync {
    fn name(&self) -> &'static str;
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>>;
}
