//! File-backed durable memory store, tail-trimmed to 500 entries on save.

use crate::entry::MemoryEntry;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::RwLock;

const MAX_ENTRIES: usize = 500;
/// Minimum combined recall score for an entry to be returned.
const MIN_SCORE: f32 = 0.15;

#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("failed to read memory store: {0}")]
    Read(std::io::Error),
    #[error("failed to write memory store: {0}")]
    Write(std::io::Error),
    #[error("failed to serialize memory store: {0}")]
    Serialize(serde_json::Error),
}

pub struct MemoryStore {
    path: PathBuf,
    entries: RwLock<Vec<MemoryEntry>>,
}

impl MemoryStore {
    /// Loads the store from `path`, pruning any entries already expired.
    /// A missing file is treated as an empty store.
    pub async fn load(path: impl Into<PathBuf>, now: jiff::Timestamp) -> Result<Self, MemoryError> {
        let path = path.into();

        let entries = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => {
                let mut entries: Vec<MemoryEntry> =
                    serde_json::from_str(&contents).map_err(MemoryError::Serialize)?;
                entries.retain(|entry| !entry.is_expired(now));
                entries
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(MemoryError::Read(e)),
        };

        Ok(Self { path, entries: RwLock::new(entries) })
    }

    /// Appends `entry`, trims the tail to `MAX_ENTRIES`, and persists.
    pub async fn save_entry(&self, entry: MemoryEntry) -> Result<(), MemoryError> {
        let mut entries = self.entries.write().await;
        entries.push(entry);
        if entries.len() > MAX_ENTRIES {
            let overflow = entries.len() - MAX_ENTRIES;
            entries.drain(0..overflow);
        }
        persist(&self.path, &entries).await
    }

    pub async fn delete(&self, id: &str) -> Result<bool, MemoryError> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|e| e.id != id);
        let removed = entries.len() != before;
        if removed {
            persist(&self.path, &entries).await?;
        }
        Ok(removed)
    }

    /// Drops every entry expired as of `now` and persists if anything changed.
    pub async fn purge_expired(&self, now: jiff::Timestamp) -> Result<usize, MemoryError> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|e| !e.is_expired(now));
        let purged = before - entries.len();
        if purged > 0 {
            persist(&self.path, &entries).await?;
        }
        Ok(purged)
    }

    /// Updates the TTL of every entry scoped to `user_id`/`team_id` in bulk.
    pub async fn set_ttl_bulk(
        &self,
        user_id: &str,
        team_id: Option<&str>,
        new_expiry: Option<jiff::Timestamp>,
    ) -> Result<usize, MemoryError> {
        let mut entries = self.entries.write().await;
        let mut updated = 0;
        for entry in entries.iter_mut() {
            if entry.scope_matches(user_id, team_id) {
                entry.expires_at = new_expiry;
                updated += 1;
            }
        }
        if updated > 0 {
            persist(&self.path, &entries).await?;
        }
        Ok(updated)
    }

    /// Lists every entry scoped to `user_id`/`team_id`, newest first, with no
    /// relevance filtering. Backs `GET /api/memory/entries` and the export
    /// endpoints, which need the full scoped set rather than a query match.
    pub async fn list(&self, user_id: &str, team_id: Option<&str>) -> Vec<MemoryEntry> {
        let entries = self.entries.read().await;
        let mut matched: Vec<MemoryEntry> =
            entries.iter().filter(|entry| entry.scope_matches(user_id, team_id)).cloned().collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matched
    }

    /// Recalls up to `limit` entries scoped to `user_id`/`team_id`, scored by
    /// keyword overlap plus embedding-weighted cosine similarity, filtered to
    /// `MIN_SCORE` and above.
    pub async fn recall(
        &self,
        user_id: &str,
        team_id: Option<&str>,
        query_keywords: &[String],
        query_embedding: Option<&[f32]>,
        limit: usize,
    ) -> Vec<MemoryEntry> {
        let entries = self.entries.read().await;
        let query_set: HashSet<&str> = query_keywords.iter().map(|k| k.as_str()).collect();

        let mut scored: Vec<(f32, MemoryEntry)> = entries
            .iter()
            .filter(|entry| entry.scope_matches(user_id, team_id))
            .filter_map(|entry| {
                let score = score(entry, &query_set, query_embedding);
                (score >= MIN_SCORE).then(|| (score, entry.clone()))
            })
            .collect();

        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.into_iter().take(limit).map(|(_, entry)| entry).collect()
    }
}

fn score(entry: &MemoryEntry, query_keywords: &HashSet<&str>, query_embedding: Option<&[f32]>) -> f32 {
    let entry_keywords: HashSet<&str> = entry.keywords.iter().map(|k| k.as_str()).collect();
    let overlap = entry_keywords.intersection(query_keywords).count() as f32;
    let keyword_score = if query_keywords.is_empty() { 0.0 } else { overlap / query_keywords.len() as f32 };

    let embedding_score = match (query_embedding, entry.embedding.as_deref()) {
        (Some(q), Some(e)) => cosine_similarity(q, e),
        _ => 0.0,
    };

    keyword_score + embedding_score
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 { 0.0 } else { dot / (norm_a * norm_b) }
}

/// Serializes `entries` and writes them via write-to-temp-then-rename, so a
/// crash mid-write never leaves a truncated store on disk.
async fn persist(path: &Path, entries: &[MemoryEntry]) -> Result<(), MemoryError> {
    let json = serde_json::to_vec_pretty(entries).map_err(MemoryError::Serialize)?;

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(MemoryError::Write)?;
    }

    let tmp_path = path.with_extension("json.tmp");
    tokio::fs::write(&tmp_path, json).await.map_err(MemoryError::Write)?;
    tokio::fs::rename(&tmp_path, path).await.map_err(MemoryError::Write)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, user_id: &str, keywords: &[&str]) -> MemoryEntry {
        MemoryEntry {
            id: id.to_string(),
            prompt: "prompt".to_string(),
            summary: "summary".to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            embedding: None,
            user_id: user_id.to_string(),
            team_id: None,
            entry_type: "note".to_string(),
            created_at: jiff::Timestamp::UNIX_EPOCH,
            expires_at: None,
        }
    }

    #[tokio::test]
    async fn list_returns_all_scoped_entries_regardless_of_relevance() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memory.json");
        let store = MemoryStore::load(&path, jiff::Timestamp::UNIX_EPOCH).await.unwrap();

        store.save_entry(entry("1", "u1", &["unrelated"])).await.unwrap();
        store.save_entry(entry("2", "u2", &["unrelated"])).await.unwrap();

        let listed = store.list("u1", None).await;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, "1");
    }

    #[tokio::test]
    async fn save_then_recall_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memory.json");
        let store = MemoryStore::load(&path, jiff::Timestamp::UNIX_EPOCH).await.unwrap();

        store.save_entry(entry("1", "u1", &["rust", "async"])).await.unwrap();

        let results =
            store.recall("u1", None, &["rust".to_string()], None, 4).await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "1");
    }

    #[tokio::test]
    async fn recall_is_scoped_by_user() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memory.json");
        let store = MemoryStore::load(&path, jiff::Timestamp::UNIX_EPOCH).await.unwrap();

        store.save_entry(entry("1", "u1", &["rust"])).await.unwrap();
        store.save_entry(entry("2", "u2", &["rust"])).await.unwrap();

        let results = store.recall("u1", None, &["rust".to_string()], None, 4).await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].user_id, "u1");
    }

    #[tokio::test]
    async fn trims_to_max_entries_on_overflow() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memory.json");
        let store = MemoryStore::load(&path, jiff::Timestamp::UNIX_EPOCH).await.unwrap();

        for i in 0..(MAX_ENTRIES + 10) {
            store.save_entry(entry(&i.to_string(), "u1", &["x"])).await.unwrap();
        }

        assert_eq!(store.entries.read().await.len(), MAX_ENTRIES);
    }

    #[tokio::test]
    async fn purge_expired_removes_old_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("memory.json");
        let store = MemoryStore::load(&path, jiff::Timestamp::UNIX_EPOCH).await.unwrap();

        let mut e = entry("1", "u1", &["rust"]);
        e.expires_at = Some(jiff::Timestamp::UNIX_EPOCH);
        store.save_entry(e).await.unwrap();

        use jiff::ToSpan;
        let later = jiff::Timestamp::UNIX_EPOCH.checked_add(1.hour()).unwrap();
        let purged = store.purge_expired(later).await.unwrap();
        assert_eq!(purged, 1);
    }
}
