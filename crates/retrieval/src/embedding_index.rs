//! Embedding chunk index over indexed files, persisted as `embeddings.json`.

use crate::chunk::{DocChunk, MAX_CHUNKS_PER_FILE, chunk_text};
use crate::keyword_index::RetrievalError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

#[derive(Debug, Default, Serialize, Deserialize)]
struct EmbeddingIndexFile {
    items: Vec<DocChunk>,
}

pub struct EmbeddingIndex {
    path: PathBuf,
    chunks: RwLock<Vec<DocChunk>>,
}

impl EmbeddingIndex {
    /// Loads the index from `path`. A missing file is treated as an empty index.
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self, RetrievalError> {
        let path = path.into();
        let chunks = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => serde_json::from_str::<EmbeddingIndexFile>(&contents).map_err(RetrievalError::Serialize)?.items,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(RetrievalError::Read(e)),
        };
        Ok(Self { path, chunks: RwLock::new(chunks) })
    }

    /// Chunks `text`, embeds each piece via `embed`, and replaces any
    /// previously indexed chunks for `path`. Caps at
    /// [`MAX_CHUNKS_PER_FILE`] by construction of [`chunk_text`].
    pub async fn index_file<F>(&self, path: &str, text: &str, chunk_size: usize, overlap: usize, mut embed: F) -> Result<(), RetrievalError>
    where
        F: FnMut(&str) -> Vec<f32>,
    {
        let pieces = chunk_text(text, chunk_size, overlap);
        let new_chunks: Vec<DocChunk> =
            pieces.into_iter().enumerate().map(|(i, piece)| DocChunk::new(path, i, piece.clone(), embed(&piece))).collect();

        let mut chunks = self.chunks.write().await;
        chunks.retain(|c| c.path != path);
        chunks.extend(new_chunks);
        persist(&self.path, &chunks).await
    }

    pub async fn remove(&self, path: &str) -> Result<bool, RetrievalError> {
        let mut chunks = self.chunks.write().await;
        let before = chunks.len();
        chunks.retain(|c| c.path != path);
        let removed = chunks.len() != before;
        if removed {
            persist(&self.path, &chunks).await?;
        }
        Ok(removed)
    }

    /// Returns the `limit` chunks with the highest cosine similarity to
    /// `query_embedding`.
    pub async fn search(&self, query_embedding: &[f32], limit: usize) -> Vec<(DocChunk, f32)> {
        let chunks = self.chunks.read().await;
        let mut scored: Vec<(DocChunk, f32)> =
            chunks.iter().map(|c| (c.clone(), cosine_similarity(query_embedding, &c.embedding))).collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(limit);
        scored
    }

    pub async fn len(&self) -> usize {
        self.chunks.read().await.len()
    }
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

async fn persist(path: &Path, chunks: &[DocChunk]) -> Result<(), RetrievalError> {
    let file = EmbeddingIndexFile { items: chunks.to_vec() };
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
    async fn index_then_search_returns_closest_chunk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("embeddings.json");
        let index = EmbeddingIndex::load(&path).await.unwrap();

        index.index_file("a.rs", "hello world, this is a test document", 10, 2, |piece| vec![piece.len() as f32, 1.0]).await.unwrap();

        assert!(index.len().await <= MAX_CHUNKS_PER_FILE);
        let hits = index.search(&[5.0, 1.0], 3);
        assert!(!hits.await.is_empty());
    }

    #[tokio::test]
    async fn reindexing_a_path_replaces_its_chunks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("embeddings.json");
        let index = EmbeddingIndex::load(&path).await.unwrap();

        index.index_file("a.rs", "first version text", 8, 0, |_| vec![1.0]).await.unwrap();
        let first_len = index.len().await;
        index.index_file("a.rs", "second", 8, 0, |_| vec![2.0]).await.unwrap();

        assert!(index.len().await <= first_len.max(1));
    }
}
