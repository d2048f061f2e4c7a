//! On-disk layout for persisted state.

use serde::Deserialize;

fn default_data_dir() -> String {
    "./data".to_string()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DataConfig {
    /// Directory holding `memory.json`, `response_cache.json`,
    /// `embeddings.json`, `doc_index.json`, and `outputs/`.
    pub data_dir: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self { data_dir: default_data_dir() }
    }
}
