//! Exact and semantic response cache.
//!
//! Bounded at 500 entries with FIFO eviction and a per-entry TTL, keyed by
//! [`intent_hash36`] for exact lookups and by embedding cosine similarity for
//! semantic lookups.

mod entry;
mod key;
mod store;

pub use entry::{CacheEntry, DEFAULT_TTL, FAST_TTL};
pub use key::intent_hash36;
pub use store::Cache;
