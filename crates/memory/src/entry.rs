//! `MemoryEntry`: a durable, user-scoped prompt/response pair.

use jiff::ToSpan;
use serde::{Deserialize, Serialize};

const MAX_KEYWORDS: usize = 40;
const MIN_KEYWORD_LEN: usize = 3;
const DEFAULT_TTL_DAYS: i64 = 30;

const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "that", "this", "with", "from", "have", "has", "are", "was", "were", "but", "not", "you",
    "your", "what", "when", "where", "which", "who", "how", "why", "can", "will", "would", "could", "should",
    "about", "into", "also", "then", "than", "its", "it's", "they", "them", "their",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryEntry {
    pub id: String,
    pub prompt: String,
    pub summary: String,
    pub keywords: Vec<String>,
    pub embedding: Option<Vec<f32>>,
    pub user_id: String,
    pub team_id: Option<String>,
    pub entry_type: String,
    pub created_at: jiff::Timestamp,
    pub expires_at: Option<jiff::Timestamp>,
}

impl MemoryEntry {
    /// Builds a new entry with an auto-assigned TTL 30 days out unless the
    /// caller overrides it.
    pub fn new(
        id: String,
        prompt: &str,
        summary: String,
        user_id: String,
        team_id: Option<String>,
        entry_type: String,
        embedding: Option<Vec<f32>>,
        now: jiff::Timestamp,
    ) -> Self {
        Self {
            id,
            keywords: extract_keywords(prompt),
            prompt: prompt.to_string(),
            summary,
            embedding,
            user_id,
            team_id,
            entry_type,
            created_at: now,
            expires_at: now.checked_add(DEFAULT_TTL_DAYS.days()).ok(),
        }
    }

    pub fn is_expired(&self, now: jiff::Timestamp) -> bool {
        self.expires_at.is_some_and(|expires| expires <= now)
    }

    pub fn scope_matches(&self, user_id: &str, team_id: Option<&str>) -> bool {
        match team_id {
            Some(team_id) => self.team_id.as_deref() == Some(team_id),
            None => self.user_id == user_id,
        }
    }
}

/// Strips stop words and short tokens, lowercases, dedups, and caps at
/// `MAX_KEYWORDS`.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut keywords = Vec::new();

    for raw in text.split(|c: char| !c.is_alphanumeric()) {
        let word = raw.to_ascii_lowercase();
        if word.len() < MIN_KEYWORD_LEN || STOP_WORDS.contains(&word.as_str()) {
            continue;
        }
        if seen.insert(word.clone()) {
            keywords.push(word);
        }
        if keywords.len() == MAX_KEYWORDS {
            break;
        }
    }

    keywords
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_stop_words_and_short_tokens() {
        let keywords = extract_keywords("What is the best way to learn Rust and Go?");
        assert!(!keywords.contains(&"the".to_string()));
        assert!(!keywords.contains(&"to".to_string()));
        assert!(keywords.contains(&"rust".to_string()));
        assert!(keywords.contains(&"learn".to_string()));
    }

    #[test]
    fn caps_keyword_count_at_forty() {
        let text = (0..60).map(|i| format!("keyword{i}")).collect::<Vec<_>>().join(" ");
        assert_eq!(extract_keywords(&text).len(), MAX_KEYWORDS);
    }

    #[test]
    fn dedups_repeated_words() {
        let keywords = extract_keywords("rust rust rust programming");
        assert_eq!(keywords.iter().filter(|k| *k == "rust").count(), 1);
    }
}
