use serde::{Deserialize, Serialize};

/// Route task tags, a closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteTask {
    Chat,
    Reason,
    Code,
    Sql,
    Debug,
    Chart,
    Vision,
    Research,
    Report,
    Dashboard,
    DashboardVanilla,
    ImagePrompt,
    VideoPrompt,
    Fast,
    Grammar,
    Personal,
}

/// The outcome of route/model selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    pub task: RouteTask,
    pub model: String,
    pub system_prompt_id: String,
    pub rationale: String,
}
