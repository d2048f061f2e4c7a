//! `AppState`: the single owning handle for every store and client the
//! request pipeline touches.

use cache::Cache;
use config::Config;
use dashmap::DashMap;
use generation::{BackendClient, BackendConfig as GenerationBackendConfig, Supervisor};
use memory::{ConversationTracker, MemoryStore};
use retrieval::{EmbeddingIndex, KeywordIndex};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tools::SqlStore;
use web::{DuckDuckGoEngine, SearchEngine, SearxngEngine, SerpApiEngine};

use crate::generator::BackendGenerator;

/// Model name used for embedding calls; not a user-facing route, just the
/// tag the backend uses to pick its embedding model.
pub const EMBEDDING_MODEL: &str = "embedding";

/// A report queued by `POST /api/reports/generate`.
pub struct ReportRecord {
    pub status: ReportStatus,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Queued,
    Done,
    Failed,
}

pub struct AppState {
    pub config: Config,
    pub data_dir: PathBuf,
    pub cache: Cache,
    pub memory: MemoryStore,
    pub conversations: ConversationTracker,
    pub keyword_index: KeywordIndex,
    pub embedding_index: EmbeddingIndex,
    pub sql_store: Arc<SqlStore>,
    pub backend: BackendClient,
    pub supervisor: Supervisor,
    pub search_engines: Vec<Arc<dyn SearchEngine>>,
    pub http_client: reqwest::Client,
    pub generator: Arc<BackendGenerator>,
    pub reports: DashMap<String, ReportRecord>,
    pub cancellations: DashMap<String, CancellationToken>,
}

impl AppState {
    /// Loads every on-disk store from `config.data.data_dir` and builds the
    /// shared clients.
    pub async fn load(config: Config) -> anyhow::Result<Self> {
        let data_dir = PathBuf::from(&config.data.data_dir);
        tokio::fs::create_dir_all(data_dir.join("outputs")).await?;

        let now = jiff::Timestamp::now();
        let memory = MemoryStore::load(data_dir.join("memory.json"), now).await?;
        let keyword_index = KeywordIndex::load(data_dir.join("doc_index.json")).await?;
        let embedding_index = EmbeddingIndex::load(data_dir.join("embeddings.json")).await?;

        let http_client = reqwest::Client::builder().user_agent("relay/0.1").build()?;

        let backend_url: url::Url = config.backend.url.parse()?;
        let backend = BackendClient::new(GenerationBackendConfig {
            url: backend_url,
            headers_timeout: Duration::from_millis(config.backend.headers_timeout_ms),
            body_timeout: Duration::from_millis(config.backend.body_timeout_ms),
            keep_alive: config.backend.keep_alive.clone(),
        });
        let supervisor = Supervisor::new(backend.clone());

        let search_engines = build_search_engines(&config, &http_client);
        let generator = Arc::new(BackendGenerator::new(backend.clone(), "chat".to_string()));

        Ok(Self {
            data_dir,
            cache: Cache::new(),
            memory,
            conversations: ConversationTracker::new(),
            keyword_index,
            embedding_index,
            sql_store: Arc::new(SqlStore::new()),
            backend,
            supervisor,
            search_engines,
            http_client,
            generator,
            reports: DashMap::new(),
            cancellations: DashMap::new(),
            config,
        })
    }

    /// Builds a fresh [`tools::ToolContext`] borrowing this state's shared
    /// clients; cheap since every field is an `Arc`/`Clone` handle.
    pub fn tool_context(&self) -> tools::ToolContext {
        tools::ToolContext {
            sql_store: self.sql_store.clone(),
            project_root: self.data_dir.clone(),
            search_engines: self.search_engines.clone(),
            http_client: self.http_client.clone(),
            generator: Some(self.generator.clone() as Arc<dyn tools::Generator>),
        }
    }
}

/// Builds the search engine fallback chain per `config.search.search_api`:
/// the configured paid API (if any) first, then SearXNG if configured, then
/// DuckDuckGo as the always-available last resort.
fn build_search_engines(config: &Config, http_client: &reqwest::Client) -> Vec<Arc<dyn SearchEngine>> {
    let mut engines: Vec<Arc<dyn SearchEngine>> = Vec::new();

    if config.search.search_api == config::SearchApi::Serpapi {
        if let Some(key) = &config.search.search_api_key {
            engines.push(Arc::new(SerpApiEngine::new(http_client.clone(), key.clone())));
        }
    }

    if let Some(url) = &config.search.searxng_url {
        engines.push(Arc::new(SearxngEngine::new(http_client.clone(), url.clone())));
    }

    engines.push(Arc::new(DuckDuckGoEngine::new(http_client.clone())));
    engines
}
