//! Per-user conversation ring buffer, bounded at `N=15`.

use context::ConversationMessage;
use dashmap::DashMap;
use std::collections::VecDeque;

const RING_CAPACITY: usize = 15;
/// A conversation summary is emitted every 8 new user messages.
const SUMMARY_EVERY: u32 = 8;

pub struct ConversationTracker {
    rings: DashMap<String, VecDeque<ConversationMessage>>,
    message_counts: DashMap<String, u32>,
}

impl Default for ConversationTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationTracker {
    pub fn new() -> Self {
        Self { rings: DashMap::new(), message_counts: DashMap::new() }
    }

    /// Appends `message` to `user_id`'s ring, evicting the oldest entry FIFO
    /// once the ring is at capacity. Returns `true` once every `SUMMARY_EVERY`
    /// new user-authored messages, signaling the caller to emit a summary.
    pub fn push(&self, user_id: &str, message: ConversationMessage) -> bool {
        let mut ring = self.rings.entry(user_id.to_string()).or_default();
        if ring.len() == RING_CAPACITY {
            ring.pop_front();
        }
        let is_user_message = message.role == context::Role::User;
        ring.push_back(message);
        drop(ring);

        if !is_user_message {
            return false;
        }

        let mut count = self.message_counts.entry(user_id.to_string()).or_insert(0);
        *count += 1;
        *count % SUMMARY_EVERY == 0
    }

    pub fn history(&self, user_id: &str) -> Vec<ConversationMessage> {
        self.rings.get(user_id).map(|ring| ring.iter().cloned().collect()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use context::Role;

    fn message(role: Role, content: &str) -> ConversationMessage {
        ConversationMessage {
            role,
            content: content.to_string(),
            timestamp: jiff::Timestamp::UNIX_EPOCH,
            intent: None,
            quality_score: None,
            code_language: None,
        }
    }

    #[test]
    fn evicts_fifo_past_capacity() {
        let tracker = ConversationTracker::new();
        for i in 0..20 {
            tracker.push("u1", message(Role::User, &format!("message {i}")));
        }
        let history = tracker.history("u1");
        assert_eq!(history.len(), RING_CAPACITY);
        assert_eq!(history[0].content, "message 5");
    }

    #[test]
    fn signals_summary_every_eight_user_messages() {
        let tracker = ConversationTracker::new();
        let mut signals = 0;
        for i in 0..16 {
            if tracker.push("u1", message(Role::User, &format!("message {i}"))) {
                signals += 1;
            }
        }
        assert_eq!(signals, 2);
    }

    #[test]
    fn assistant_messages_do_not_count_toward_the_summary_trigger() {
        let tracker = ConversationTracker::new();
        for _ in 0..8 {
            tracker.push("u1", message(Role::Assistant, "reply"));
        }
        assert!(tracker.message_counts.get("u1").is_none());
    }
}
