//! Bounded, FIFO-evicted exact and semantic response cache.

use crate::entry::CacheEntry;
use dashmap::DashMap;
use std::collections::VecDeque;
use std::sync::Mutex;

const MAX_ENTRIES: usize = 500;
/// Minimum cosine similarity for a semantic cache hit.
const SEMANTIC_THRESHOLD: f32 = 0.93;

pub struct Cache {
    entries: DashMap<String, CacheEntry>,
    order: Mutex<VecDeque<String>>,
}

impl Default for Cache {
    fn default() -> Self {
        Self::new()
    }
}

impl Cache {
    pub fn new() -> Self {
        Self { entries: DashMap::new(), order: Mutex::new(VecDeque::new()) }
    }

    /// Looks up `key` exactly, dropping the entry first if it has expired.
    pub fn get_exact(&self, key: &str) -> Option<CacheEntry> {
        let expired = self.entries.get(key).is_some_and(|entry| entry.is_expired());
        if expired {
            self.remove(key);
            return None;
        }
        let mut hit = self.entries.get_mut(key)?;
        hit.hits += 1;
        Some(hit.clone())
    }

    /// Scans all live entries for the closest embedding above
    /// `SEMANTIC_THRESHOLD`. A linear scan is acceptable at the bounded
    /// 500-entry scale this cache is capped at.
    pub fn get_semantic(&self, embedding: &[f32]) -> Option<CacheEntry> {
        let mut best: Option<(String, f32)> = None;
        for item in self.entries.iter() {
            if item.is_expired() {
                continue;
            }
            let Some(candidate) = item.embedding.as_deref() else { continue };
            let score = cosine_similarity(embedding, candidate);
            let improves = match &best {
                Some((_, best_score)) => score > *best_score,
                None => true,
            };
            if score >= SEMANTIC_THRESHOLD && improves {
                best = Some((item.key.clone(), score));
            }
        }
        let (key, _) = best?;
        let mut hit = self.entries.get_mut(&key)?;
        hit.hits += 1;
        Some(hit.clone())
    }

    /// Inserts `entry`, evicting the oldest entry FIFO once over capacity.
    pub fn insert(&self, entry: CacheEntry) {
        let key = entry.key.clone();
        let is_new = self.entries.insert(key.clone(), entry).is_none();
        if !is_new {
            return;
        }

        let mut order = self.order.lock().expect("cache order mutex poisoned");
        order.push_back(key);
        while order.len() > MAX_ENTRIES {
            if let Some(oldest) = order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
    }

    fn remove(&self, key: &str) {
        self.entries.remove(key);
        let mut order = self.order.lock().expect("cache order mutex poisoned");
        order.retain(|k| k != key);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use context::Intent;

    fn entry(key: &str, embedding: Option<Vec<f32>>) -> CacheEntry {
        CacheEntry::new(key.to_string(), format!("response for {key}"), Intent::SimpleQa, embedding, false)
    }

    #[test]
    fn exact_hit_increments_hits() {
        let cache = Cache::new();
        cache.insert(entry("k1", None));
        let hit = cache.get_exact("k1").unwrap();
        assert_eq!(hit.hits, 1);
        let hit = cache.get_exact("k1").unwrap();
        assert_eq!(hit.hits, 2);
    }

    #[test]
    fn exact_miss_on_unknown_key() {
        let cache = Cache::new();
        assert!(cache.get_exact("missing").is_none());
    }

    #[test]
    fn evicts_oldest_past_capacity() {
        let cache = Cache::new();
        for i in 0..(MAX_ENTRIES + 10) {
            cache.insert(entry(&format!("k{i}"), None));
        }
        assert_eq!(cache.len(), MAX_ENTRIES);
        assert!(cache.get_exact("k0").is_none());
        assert!(cache.get_exact(&format!("k{}", MAX_ENTRIES + 9)).is_some());
    }

    #[test]
    fn semantic_hit_above_threshold() {
        let cache = Cache::new();
        cache.insert(entry("k1", Some(vec![1.0, 0.0, 0.0])));
        let hit = cache.get_semantic(&[1.0, 0.0, 0.0]).unwrap();
        assert_eq!(hit.key, "k1");
    }

    #[test]
    fn semantic_miss_below_threshold() {
        let cache = Cache::new();
        cache.insert(entry("k1", Some(vec![1.0, 0.0, 0.0])));
        assert!(cache.get_semantic(&[0.0, 1.0, 0.0]).is_none());
    }
}
