//! Hybrid RAG context: union of keyword-index and embedding-index hits,
//! optionally reranked by a scoring model.

use crate::embedding_index::EmbeddingIndex;
use crate::keyword_index::KeywordIndex;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Serialize)]
pub struct RetrievalHit {
    pub id: String,
    pub path: String,
    pub text: String,
    pub score: f32,
}

#[derive(Debug, Clone)]
pub struct RerankScore {
    pub id: String,
    pub score: f32,
}

/// An optional reranking pass over the union of hybrid hits, scoring each
/// candidate and emitting `[{id, score}]`.
pub trait Reranker {
    fn rerank(&self, query: &str, candidates: &[RetrievalHit]) -> Vec<RerankScore>;
}

/// Unions keyword-index and embedding-index hits for `query`, deduplicated
/// by id, optionally reranked, sorted descending by score and truncated to
/// `limit`.
pub async fn hybrid_search(
    keyword_index: &KeywordIndex,
    embedding_index: &EmbeddingIndex,
    query: &str,
    query_keywords: &[String],
    query_embedding: Option<&[f32]>,
    limit: usize,
    reranker: Option<&dyn Reranker>,
) -> Vec<RetrievalHit> {
    let mut hits: Vec<RetrievalHit> = keyword_index
        .search(query_keywords, limit)
        .await
        .into_iter()
        .map(|(entry, score)| RetrievalHit { id: format!("kw:{}", entry.path), path: entry.path, text: entry.snippet, score: score as f32 })
        .collect();

    if let Some(embedding) = query_embedding {
        hits.extend(embedding_index.search(embedding, limit).await.into_iter().map(|(chunk, score)| RetrievalHit {
            id: format!("emb:{}:{}", chunk.path, chunk.chunk_index),
            path: chunk.path,
            text: chunk.text,
            score,
        }));
    }

    let mut seen = HashSet::new();
    hits.retain(|h| seen.insert(h.id.clone()));

    if let Some(reranker) = reranker {
        let scores: HashMap<String, f32> = reranker.rerank(query, &hits).into_iter().map(|s| (s.id, s.score)).collect();
        for hit in hits.iter_mut() {
            if let Some(&score) = scores.get(&hit.id) {
                hit.score = score;
            }
        }
    }

    hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    hits.truncate(limit);
    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ReverseReranker;
    impl Reranker for ReverseReranker {
        fn rerank(&self, _query: &str, candidates: &[RetrievalHit]) -> Vec<RerankScore> {
            candidates.iter().enumerate().map(|(i, c)| RerankScore { id: c.id.clone(), score: i as f32 }).collect()
        }
    }

    #[tokio::test]
    async fn unions_keyword_and_embedding_hits() {
        let dir = tempfile::tempdir().unwrap();
        let kw_index = KeywordIndex::load(dir.path().join("doc_index.json")).await.unwrap();
        let emb_index = EmbeddingIndex::load(dir.path().join("embeddings.json")).await.unwrap();

        kw_index.index_file("a.rs", vec!["router".to_string()], "keyword hit").await.unwrap();
        emb_index.index_file("b.rs", "embedding hit text", 40, 5, |_| vec![1.0, 0.0]).await.unwrap();

        let hits = hybrid_search(&kw_index, &emb_index, "router", &["router".to_string()], Some(&[1.0, 0.0]), 10, None).await;

        assert!(hits.iter().any(|h| h.path == "a.rs"));
        assert!(hits.iter().any(|h| h.path == "b.rs"));
    }

    #[tokio::test]
    async fn reranker_overrides_scores_and_reorders() {
        let dir = tempfile::tempdir().unwrap();
        let kw_index = KeywordIndex::load(dir.path().join("doc_index.json")).await.unwrap();
        let emb_index = EmbeddingIndex::load(dir.path().join("embeddings.json")).await.unwrap();

        kw_index.index_file("low.rs", vec!["x".to_string(), "y".to_string()], "low").await.unwrap();
        kw_index.index_file("high.rs", vec!["x".to_string()], "high").await.unwrap();

        let reranker = ReverseReranker;
        let hits = hybrid_search(&kw_index, &emb_index, "x", &["x".to_string(), "y".to_string()], None, 10, Some(&reranker)).await;

        assert_eq!(hits[0].score, (hits.len() - 1) as f32);
    }
}
