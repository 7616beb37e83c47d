//! Retrieval-augmented generation: hybrid dense+sparse document search,
//! fused with Reciprocal Rank Fusion, for tiers with `rag_depth > 0`.
//!
//! - Dense vector search via Qdrant
//! - Sparse BM25 search via Tantivy
//! - Hybrid fusion with RRF
//! - Hash-based embeddings with an optional ONNX backend

pub mod embeddings;
pub mod retriever;
pub mod sparse_search;
pub mod vector_store;

pub use embeddings::{Embedder, EmbeddingConfig, SimpleEmbedder};
pub use retriever::{HybridRetriever, RetrieverConfig, SearchResult};
pub use sparse_search::{SparseConfig, SparseIndex};
pub use vector_store::{VectorDistance, VectorStore, VectorStoreConfig};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RagError {
    #[error("embedding error: {0}")]
    Embedding(String),

    #[error("vector store error: {0}")]
    VectorStore(String),

    #[error("search error: {0}")]
    Search(String),

    #[error("model error: {0}")]
    Model(String),

    #[error("index error: {0}")]
    Index(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("connection error: {0}")]
    Connection(String),
}

impl From<RagError> for voice_agent_core::Error {
    fn from(err: RagError) -> Self {
        voice_agent_core::Error::Rag(err.to_string())
    }
}
