//! Conversation ring buffer and durable memory store.

mod conversation;
mod entry;
mod store;

pub use conversation::ConversationTracker;
pub use entry::{MemoryEntry, extract_keywords};
pub use store::{MemoryError, MemoryStore};

/// A prompt is a vague follow-up when it shares at least one extracted
/// keyword with the previous turn, whatever the previous turn's role.
pub fn is_followup(prompt: &str, last_turn: Option<&str>) -> bool {
    let Some(last_turn) = last_turn else { return false };
    let prompt_keywords = extract_keywords(prompt);
    let last_keywords = extract_keywords(last_turn);
    prompt_keywords.iter().any(|k| last_keywords.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_prior_turn_is_never_a_followup() {
        assert!(!is_followup("what about it?", None));
    }

    #[test]
    fn shared_keyword_with_the_previous_turn_is_a_followup() {
        assert!(is_followup("what about performance?", Some("Rust has strong performance guarantees.")));
    }

    #[test]
    fn unrelated_prompt_is_not_a_followup() {
        assert!(!is_followup("what's the weather like today?", Some("Rust has strong performance guarantees.")));
    }
}
