use serde::{Deserialize, Serialize};

use crate::Intent;

/// A single turn in the bounded per-user conversation ring buffer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub role: Role,
    pub content: String,
    pub timestamp: jiff::Timestamp,
    /// Only set for `Role::User` turns.
    pub intent: Option<Intent>,
    /// Only set for `Role::User` turns.
    pub quality_score: Option<f32>,
    pub code_language: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}
