//! Web context: search engine fallback chain and page-text extraction.

mod citation;
mod engines;
mod error;
mod fetch;
mod search_engine;

pub use citation::format_citations;
pub use engines::{DuckDuckGoEngine, SearxngEngine, SerpApiEngine};
pub use error::{Result, WebError};
pub use fetch::{FetchedPage, MAX_PAGE_CHARS, fetch_page};
pub use search_engine::{SearchEngine, SearchResult};

use log::debug;

/// Tries each engine in order, returning the first non-empty result list.
pub async fn search(engines: &[&dyn SearchEngine], query: &str, limit: usize) -> Result<Vec<SearchResult>> {
    for engine in engines {
        match engine.search(query, limit).await {
            Ok(results) if !results.is_empty() => return Ok(results),
            Ok(_) => debug!("{} returned no results for {query:?}", engine.name()),
            Err(e) => debug!("{} failed: {e}", engine.name()),
        }
    }
    Err(WebError::Empty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct Empty;
    #[async_trait]
    impl SearchEngine for Empty {
        fn name(&self) -> &'static str {
            "empty"
        }
        async fn search(&self, _query: &str, _limit: usize) -> Result<Vec<SearchResult>> {
            Ok(vec![])
        }
    }

    struct Failing;
    #[async_trait]
    impl SearchEngine for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }
        async fn search(&self, _query: &str, _limit: usize) -> Result<Vec<SearchResult>> {
            Err(WebError::Request("boom".to_string()))
        }
    }

    struct Working;
    #[async_trait]
    impl SearchEngine for Working {
        fn name(&self) -> &'static str {
            "working"
        }
        async fn search(&self, _query: &str, _limit: usize) -> Result<Vec<SearchResult>> {
            Ok(vec![SearchResult { title: "T".to_string(), url: "https://x".to_string(), snippet: "s".to_string() }])
        }
    }

    #[tokio::test]
    async fn falls_through_empty_and_failing_to_working() {
        let (empty, failing, working) = (Empty, Failing, Working);
        let engines: Vec<&dyn SearchEngine> = vec![&empty, &failing, &working];
        let results = search(&engines, "query", 5).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "T");
    }

    #[tokio::test]
    async fn all_empty_surfaces_as_empty_error() {
        let empty = Empty;
        let engines: Vec<&dyn SearchEngine> = vec![&empty];
        assert!(matches!(search(&engines, "query", 5).await, Err(WebError::Empty)));
    }
}
