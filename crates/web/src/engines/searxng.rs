use crate::error::{Result, WebError};
use crate::search_engine::{SearchEngine, SearchResult};
use async_trait::async_trait;
use serde::Deserialize;

pub struct SearxngEngine {
    client: reqwest::Client,
    base_url: String,
}

impl SearxngEngine {
    pub fn new(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }
}

#[derive(Deserialize)]
struct SearxngResponse {
    #[serde(default)]
    results: Vec<SearxngResult>,
}

#[derive(Deserialize)]
struct SearxngResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    content: String,
}

#[async_trait]
impl SearchEngine for SearxngEngine {
    fn name(&self) -> &'static str {
        "searxng"
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>> {
        let endpoint = format!("{}/search", self.base_url.trim_end_matches('/'));
        let response = self
            .client
            .get(endpoint)
            .query(&[("q", query), ("format", "json")])
            .send()
            .await
            .map_err(|e| WebError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(WebError::Request(format!("searxng returned {}", response.status())));
        }

        let body: SearxngResponse = response.json().await.map_err(|e| WebError::Request(e.to_string()))?;

        Ok(body
            .results
            .into_iter()
            .take(limit)
            .map(|r| SearchResult { title: r.title, url: r.url, snippet: r.content })
            .collect())
    }
}
