//! `DocEntry` (keyword index) and `DocChunk` (embedding index) records.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Maximum snippet length kept for a keyword-indexed file.
pub const MAX_SNIPPET_CHARS: usize = 60_000;
/// Maximum number of embedding chunks kept per file.
pub const MAX_CHUNKS_PER_FILE: usize = 120;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocEntry {
    pub path: String,
    pub keywords: Vec<String>,
    pub snippet: String,
}

impl DocEntry {
    pub fn new(path: impl Into<String>, keywords: Vec<String>, snippet: &str) -> Self {
        let mut snippet = snippet.to_string();
        if snippet.len() > MAX_SNIPPET_CHARS {
            snippet.truncate(MAX_SNIPPET_CHARS);
        }
        Self { path: path.into(), keywords, snippet }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocChunk {
    pub path: String,
    pub chunk_index: usize,
    pub text: String,
    pub embedding: Vec<f32>,
    pub content_hash: String,
}

impl DocChunk {
    pub fn new(path: impl Into<String>, chunk_index: usize, text: String, embedding: Vec<f32>) -> Self {
        let path = path.into();
        let content_hash = hash_content(&path, chunk_index, &text);
        Self { path, chunk_index, text, embedding, content_hash }
    }
}

fn hash_content(path: &str, chunk_index: usize, text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(path.as_bytes());
    hasher.update(b":");
    hasher.update(chunk_index.to_string().as_bytes());
    hasher.update(b":");
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Splits `text` into chunks of `chunk_size` characters with `overlap`
/// characters shared between consecutive chunks, capped at
/// [`MAX_CHUNKS_PER_FILE`].
pub fn chunk_text(text: &str, chunk_size: usize, overlap: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() || chunk_size == 0 {
        return Vec::new();
    }
    let stride = chunk_size.saturating_sub(overlap).max(1);

    let mut chunks = Vec::new();
    let mut start = 0;
    while start < chars.len() && chunks.len() < MAX_CHUNKS_PER_FILE {
        let end = (start + chunk_size).min(chars.len());
        chunks.push(chars[start..end].iter().collect());
        if end == chars.len() {
            break;
        }
        start += stride;
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_text_overlaps_consecutive_windows() {
        let text = "abcdefghij";
        let chunks = chunk_text(text, 4, 2);
        assert_eq!(chunks[0], "abcd");
        assert_eq!(chunks[1], "cdef");
    }

    #[test]
    fn chunk_text_caps_at_max_chunks_per_file() {
        let text = "x".repeat(10_000);
        let chunks = chunk_text(&text, 10, 0);
        assert_eq!(chunks.len(), MAX_CHUNKS_PER_FILE);
    }

    #[test]
    fn content_hash_changes_with_any_field() {
        let a = DocChunk::new("a.rs", 0, "hello".to_string(), vec![]);
        let b = DocChunk::new("a.rs", 1, "hello".to_string(), vec![]);
        assert_ne!(a.content_hash, b.content_hash);
    }

    #[test]
    fn doc_entry_truncates_long_snippets() {
        let long = "x".repeat(MAX_SNIPPET_CHARS + 500);
        let entry = DocEntry::new("a.rs", vec![], &long);
        assert_eq!(entry.snippet.len(), MAX_SNIPPET_CHARS);
    }
}
