//! DuckDuckGo has no free JSON search API; this adapter scrapes its HTML-only
//! endpoint the same way [`crate::fetch`] scrapes an arbitrary page.

use crate::error::{Result, WebError};
use crate::search_engine::{SearchEngine, SearchResult};
use async_trait::async_trait;
use scraper::{Html, Selector};

pub struct DuckDuckGoEngine {
    client: reqwest::Client,
}

impl DuckDuckGoEngine {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SearchEngine for DuckDuckGoEngine {
    fn name(&self) -> &'static str {
        "duckduckgo"
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>> {
        let response = self
            .client
            .get("https://html.duckduckgo.com/html/")
            .query(&[("q", query)])
            .send()
            .await
            .map_err(|e| WebError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(WebError::Request(format!("duckduckgo returned {}", response.status())));
        }

        let body = response.text().await.map_err(|e| WebError::Request(e.to_string()))?;
        Ok(parse_results(&body, limit))
    }
}

fn parse_results(html: &str, limit: usize) -> Vec<SearchResult> {
    let document = Html::parse_document(html);
    let Ok(result_selector) = Selector::parse(".result") else { return Vec::new() };
    let Ok(title_selector) = Selector::parse(".result__a") else { return Vec::new() };
    let Ok(snippet_selector) = Selector::parse(".result__snippet") else { return Vec::new() };

    document
        .select(&result_selector)
        .filter_map(|result| {
            let title_el = result.select(&title_selector).next()?;
            let title = title_el.text().collect::<Vec<_>>().join(" ").trim().to_string();
            let url = title_el.value().attr("href")?.to_string();
            let snippet =
                result.select(&snippet_selector).next().map(|el| el.text().collect::<Vec<_>>().join(" ").trim().to_string()).unwrap_or_default();
            (!title.is_empty() && !url.is_empty()).then_some(SearchResult { title, url, snippet })
        })
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_result_blocks() {
        let html = r#"
            <div class="result">
                <a class="result__a" href="https://example.com">Example Title</a>
                <a class="result__snippet">Example snippet text.</a>
            </div>
        "#;
        let results = parse_results(html, 10);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Example Title");
        assert_eq!(results[0].url, "https://example.com");
    }

    #[test]
    fn empty_html_yields_no_results() {
        assert!(parse_results("<html></html>", 10).is_empty());
    }
}
