//! Web search settings.

use serde::Deserialize;

/// Which paid search API (if any) precedes SearXNG and DuckDuckGo in the
/// fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SearchApi {
    /// No paid API; SearXNG (if configured) then DuckDuckGo are tried.
    #[default]
    None,
    /// SerpAPI, using `search_api_key`.
    Serpapi,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Which API engine to try first, ahead of SearXNG and DuckDuckGo.
    pub search_api: SearchApi,
    /// API key for `search_api`, when it requires one.
    pub search_api_key: Option<String>,
    /// Base URL of a self-hosted SearXNG instance.
    pub searxng_url: Option<String>,
}
