//! Hybrid keyword/embedding retrieval index over local files.
//!
//! Two independently persisted indexes back the "hybrid RAG" context
//! section: a keyword inverted index built from each file's extracted
//! keywords and snippet, and an embedding chunk index built from
//! overlapping text windows. [`hybrid_search`] unions hits from both,
//! optionally reranked by a scoring model.

mod chunk;
mod embedding_index;
mod hybrid;
mod keyword_index;

pub use chunk::{DocChunk, DocEntry, MAX_CHUNKS_PER_FILE, MAX_SNIPPET_CHARS, chunk_text};
pub use embedding_index::EmbeddingIndex;
pub use hybrid::{RerankScore, Reranker, RetrievalHit, hybrid_search};
pub use keyword_index::{KeywordIndex, RetrievalError};

pub use memory::extract_keywords;
