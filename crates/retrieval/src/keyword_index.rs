//! Keyword inverted index over indexed files, persisted as `doc_index.json`.

use crate::chunk::DocEntry;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("failed to read index: {0}")]
    Read(std::io::Error),
    #[error("failed to write index: {0}")]
    Write(std::io::Error),
    #[error("failed to serialize index: {0}")]
    Serialize(serde_json::Error),
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct DocIndexFile {
    entries: Vec<DocEntry>,
}

pub struct KeywordIndex {
    path: PathBuf,
    entries: RwLock<Vec<DocEntry>>,
}

impl KeywordIndex {
    /// Loads the index from `path`. A missing file is treated as an empty index.
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self, RetrievalError> {
        let path = path.into();
        let entries = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => serde_json::from_str::<DocIndexFile>(&contents).map_err(RetrievalError::Serialize)?.entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(RetrievalError::Read(e)),
        };
        Ok(Self { path, entries: RwLock::new(entries) })
    }

    /// Indexes `path`'s extracted keywords and snippet, replacing any
    /// existing entry for the same path.
    pub async fn index_file(&self, path: &str, keywords: Vec<String>, snippet: &str) -> Result<(), RetrievalError> {
        let mut entries = self.entries.write().await;
        entries.retain(|e| e.path != path);
        entries.push(DocEntry::new(path, keywords, snippet));
        persist(&self.path, &entries).await
    }

    pub async fn remove(&self, path: &str) -> Result<bool, RetrievalError> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|e| e.path != path);
        let removed = entries.len() != before;
        if removed {
            persist(&self.path, &entries).await?;
        }
        Ok(removed)
    }

    /// Scores every indexed file by the count of `query_keywords` it
    /// contains, returning non-zero matches sorted descending.
    pub async fn search(&self, query_keywords: &[String], limit: usize) -> Vec<(DocEntry, usize)> {
        let entries = self.entries.read().await;
        let query: HashSet<&str> = query_keywords.iter().map(|k| k.as_str()).collect();

        let mut scored: Vec<(DocEntry, usize)> = entries
            .iter()
            .filter_map(|entry| {
                let entry_keywords: HashSet<&str> = entry.keywords.iter().map(|k| k.as_str()).collect();
                let score = entry_keywords.intersection(&query).count();
                (score > 0).then(|| (entry.clone(), score))
            })
            .collect();

        scored.sort_by(|a, b| b.1.cmp(&a.1));
        scored.truncate(limit);
        scored
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

async fn persist(path: &Path, entries: &[DocEntry]) -> Result<(), RetrievalError> {
    let file = DocIndexFile { entries: entries.to_vec() };
    let json = serde_json::to_vec_pretty(&file).map_err(RetrievalError::Serialize)?;

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(RetrievalError::Write)?;
    }

    let tmp_path = path.with_extension("json.tmp");
    tokio::fs::write(&tmp_path, json).await.map_err(RetrievalError::Write)?;
    tokio::fs::rename(&tmp_path, path).await.map_err(RetrievalError::Write)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn index_then_search_finds_keyword_match() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc_index.json");
        let index = KeywordIndex::load(&path).await.unwrap();

        index.index_file("src/main.rs", vec!["tokio".to_string(), "router".to_string()], "fn main() {}").await.unwrap();

        let hits = index.search(&["router".to_string()], 4).await;
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].0.path, "src/main.rs");
    }

    #[tokio::test]
    async fn reindexing_a_path_replaces_its_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc_index.json");
        let index = KeywordIndex::load(&path).await.unwrap();

        index.index_file("a.rs", vec!["old".to_string()], "old").await.unwrap();
        index.index_file("a.rs", vec!["new".to_string()], "new").await.unwrap();

        assert_eq!(index.len().await, 1);
        assert!(index.search(&["old".to_string()], 4).await.is_empty());
        assert_eq!(index.search(&["new".to_string()], 4).await.len(), 1);
    }

    #[tokio::test]
    async fn reloads_persisted_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc_index.json");
        let index = KeywordIndex::load(&path).await.unwrap();
        index.index_file("a.rs", vec!["rust".to_string()], "body").await.unwrap();
        drop(index);

        let reloaded = KeywordIndex::load(&path).await.unwrap();
        assert_eq!(reloaded.len().await, 1);
    }
}
