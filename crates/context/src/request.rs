use serde::{Deserialize, Serialize};

/// Incoming request, built identically by the HTTP and WS ingress points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    pub request_id: String,
    pub user_id: String,
    pub team_id: Option<String>,
    /// Prompt exactly as received.
    pub raw_prompt: String,
    /// Trimmed + spelling-normalized prompt.
    pub normalized_prompt: String,
    pub language: Option<String>,
    pub task_override: Option<String>,
    pub model_override: Option<String>,
    pub options: Options,
    pub flags: Flags,
    pub file_paths: Vec<String>,
    pub image_description: Option<String>,
    pub response_spec: Option<ResponseSpec>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Flags {
    pub fast: bool,
    pub auto_web: bool,
    pub auto_files: bool,
    pub use_doc_index: bool,
    pub use_embeddings: bool,
    pub team_mode: bool,
    /// Save a `MemoryEntry` for this turn even without the "save to memory" phrase.
    pub force_memory: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseSpec {
    Text,
    Table,
    List,
    Ranking,
    Chart,
}
