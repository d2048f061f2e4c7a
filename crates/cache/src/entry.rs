use context::Intent;
use std::time::{Duration, Instant};

/// Default TTL for a cached answer; "fast"-route queries get a longer TTL
/// since the underlying model/route rarely changes its answer shape.
pub const DEFAULT_TTL: Duration = Duration::from_secs(12 * 60 * 60);
pub const FAST_TTL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub key: String,
    pub response: String,
    pub intent: Intent,
    pub embedding: Option<Vec<f32>>,
    pub hits: u64,
    pub(crate) inserted_at: Instant,
    pub(crate) ttl: Duration,
}

impl CacheEntry {
    pub fn new(key: String, response: String, intent: Intent, embedding: Option<Vec<f32>>, is_fast_route: bool) -> Self {
        Self {
            key,
            response,
            intent,
            embedding,
            hits: 0,
            inserted_at: Instant::now(),
            ttl: if is_fast_route { FAST_TTL } else { DEFAULT_TTL },
        }
    }

    pub fn is_expired(&self) -> bool {
        self.inserted_at.elapsed() > self.ttl
    }
}
