//! Tool dispatcher settings.

use serde::Deserialize;

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsConfig {
    /// Whether the `/api/tools/*` endpoints and explicit/chained tool
    /// dispatch are enabled at all.
    pub enabled: bool,
    /// Enforces the scripting/JS denylists. Disabling this is for trusted,
    /// fully sandboxed deployments only.
    pub safe_mode: bool,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self { enabled: default_true(), safe_mode: default_true() }
    }
}
