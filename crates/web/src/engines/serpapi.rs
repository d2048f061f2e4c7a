use crate::error::{Result, WebError};
use crate::search_engine::{SearchEngine, SearchResult};
use async_trait::async_trait;
use serde::Deserialize;

pub struct SerpApiEngine {
    client: reqwest::Client,
    api_key: String,
}

impl SerpApiEngine {
    pub fn new(client: reqwest::Client, api_key: String) -> Self {
        Self { client, api_key }
    }
}

#[derive(Deserialize)]
struct SerpApiResponse {
    #[serde(default)]
    organic_results: Vec<OrganicResult>,
}

#[derive(Deserialize)]
struct OrganicResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    link: String,
    #[serde(default)]
    snippet: String,
}

#[async_trait]
impl SearchEngine for SerpApiEngine {
    fn name(&self) -> &'static str {
        "serpapi"
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>> {
        let response = self
            .client
            .get("https://serpapi.com/search.json")
            .query(&[("q", query), ("api_key", self.api_key.as_str()), ("num", &limit.to_string())])
            .send()
            .await
            .map_err(|e| WebError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(WebError::Request(format!("serpapi returned {}", response.status())));
        }

        let body: SerpApiResponse = response.json().await.map_err(|e| WebError::Request(e.to_string()))?;

        Ok(body
            .organic_results
            .into_iter()
            .take(limit)
            .map(|r| SearchResult { title: r.title, url: r.link, snippet: r.snippet })
            .collect())
    }
}
