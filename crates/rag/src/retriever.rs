//! Hybrid Retriever
//!
//! Combines dense and sparse search with RRF fusion.

use std::collections::HashMap;
use std::sync::Arc;

use crate::embeddings::{EmbeddingConfig, SimpleEmbedder};
use crate::sparse_search::SparseIndex;
use crate::vector_store::{SearchFilter, VectorStore};
use crate::RagError;

/// Retriever configuration
#[derive(Debug, Clone)]
pub struct RetrieverConfig {
    /// Number of candidates from dense search
    pub dense_top_k: usize,
    /// Number of candidates from sparse search
    pub sparse_top_k: usize,
    /// Final number of results returned to the caller
    pub final_top_k: usize,
    /// Weight for dense scores in fusion (0.0 - 1.0)
    pub dense_weight: f32,
    /// RRF k parameter
    pub rrf_k: f32,
    /// Minimum score threshold
    pub min_score: f32,
    /// Minimum confidence threshold for prefetching on a partial transcript
    pub prefetch_confidence_threshold: f32,
    /// Number of results to prefetch
    pub prefetch_top_k: usize,
}

impl Default for RetrieverConfig {
    fn default() -> Self {
        Self {
            dense_top_k: 20,
            sparse_top_k: 20,
            final_top_k: 5,
            dense_weight: 0.6,
            rrf_k: 60.0,
            min_score: 0.1,
            prefetch_confidence_threshold: 0.7,
            prefetch_top_k: 3,
        }
    }
}

/// Final search result
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Document ID
    pub id: String,
    /// Document content
    pub content: String,
    /// Fused score
    pub score: f32,
    /// Metadata
    pub metadata: HashMap<String, String>,
    /// Source (dense, sparse, or hybrid)
    pub source: SearchSource,
}

/// Search source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchSource {
    Dense,
    Sparse,
    Hybrid,
}

/// Hybrid retriever combining dense and sparse search, fused with
/// Reciprocal Rank Fusion. Used for tier-gated top-k document retrieval
/// ahead of LLM generation.
pub struct HybridRetriever {
    config: RetrieverConfig,
    embedder: Arc<SimpleEmbedder>,
    sparse_index: Option<Arc<SparseIndex>>,
}

impl HybridRetriever {
    pub fn new(config: RetrieverConfig) -> Self {
        Self {
            config,
            embedder: Arc::new(SimpleEmbedder::new(EmbeddingConfig::default())),
            sparse_index: None,
        }
    }

    /// Set sparse index
    pub fn with_sparse_index(mut self, index: Arc<SparseIndex>) -> Self {
        self.sparse_index = Some(index);
        self
    }

    /// Search with dense retrieval only
    pub async fn search_dense(
        &self,
        query: &str,
        vector_store: &VectorStore,
        filter: Option<SearchFilter>,
    ) -> Result<Vec<SearchResult>, RagError> {
        let embedder = Arc::clone(&self.embedder);
        let query_owned = query.to_string();
        let query_embedding = tokio::task::spawn_blocking(move || embedder.embed(&query_owned))
            .await
            .map_err(|e| RagError::Embedding(format!("embedding task failed: {e}")))?;

        let results = vector_store.search(&query_embedding, self.config.dense_top_k, filter).await?;

        Ok(results
            .into_iter()
            .map(|r| SearchResult {
                id: r.id,
                content: r.content,
                score: r.score,
                metadata: r.metadata,
                source: SearchSource::Dense,
            })
            .collect())
    }

    /// Search with sparse retrieval only
    pub fn search_sparse(&self, query: &str) -> Result<Vec<SearchResult>, RagError> {
        let sparse = self
            .sparse_index
            .as_ref()
            .ok_or_else(|| RagError::Search("no sparse index configured".to_string()))?;

        let results = sparse.search(query, Some(self.config.sparse_top_k))?;

        Ok(results
            .into_iter()
            .map(|r| SearchResult {
                id: r.id,
                content: r.content,
                score: r.score,
                metadata: r.metadata,
                source: SearchSource::Sparse,
            })
            .collect())
    }

    /// Hybrid search: dense and sparse run concurrently, fused with RRF.
    pub async fn search(
        &self,
        query: &str,
        vector_store: &VectorStore,
        filter: Option<SearchFilter>,
    ) -> Result<Vec<SearchResult>, RagError> {
        let dense_future = self.search_dense(query, vector_store, filter.clone());

        let sparse_index_clone = self.sparse_index.clone();
        let query_owned = query.to_string();
        let sparse_top_k = self.config.sparse_top_k;

        let sparse_future = async move {
            if let Some(sparse) = sparse_index_clone {
                let results = tokio::task::spawn_blocking(move || sparse.search(&query_owned, Some(sparse_top_k)))
                    .await
                    .map_err(|e| RagError::Search(format!("sparse search task failed: {e}")))??;

                Ok::<Vec<SearchResult>, RagError>(
                    results
                        .into_iter()
                        .map(|r| SearchResult {
                            id: r.id,
                            content: r.content,
                            score: r.score,
                            metadata: r.metadata,
                            source: SearchSource::Sparse,
                        })
                        .collect(),
                )
            } else {
                Ok(Vec::new())
            }
        };

        let (dense_result, sparse_result) = tokio::join!(dense_future, sparse_future);
        let dense_results = dense_result?;
        let sparse_results = sparse_result?;

        let fused = self.rrf_fusion(&dense_results, &sparse_results);

        Ok(fused
            .into_iter()
            .filter(|r| r.score >= self.config.min_score)
            .take(self.config.final_top_k)
            .collect())
    }

    /// Reciprocal Rank Fusion
    fn rrf_fusion(&self, dense: &[SearchResult], sparse: &[SearchResult]) -> Vec<SearchResult> {
        let mut scores: HashMap<String, (f32, SearchResult)> = HashMap::new();

        for (rank, result) in dense.iter().enumerate() {
            let rrf_score = 1.0 / (self.config.rrf_k + rank as f32 + 1.0);
            let weighted = rrf_score * self.config.dense_weight;

            scores
                .entry(result.id.clone())
                .and_modify(|(s, _)| *s += weighted)
                .or_insert((weighted, result.clone()));
        }

        let sparse_weight = 1.0 - self.config.dense_weight;
        for (rank, result) in sparse.iter().enumerate() {
            let rrf_score = 1.0 / (self.config.rrf_k + rank as f32 + 1.0);
            let weighted = rrf_score * sparse_weight;

            scores
                .entry(result.id.clone())
                .and_modify(|(s, r)| {
                    *s += weighted;
                    r.source = SearchSource::Hybrid;
                })
                .or_insert((weighted, {
                    let mut r = result.clone();
                    r.source = SearchSource::Sparse;
                    r
                }));
        }

        let mut results: Vec<SearchResult> = scores
            .into_iter()
            .map(|(_, (score, mut result))| {
                result.score = score;
                result
            })
            .collect();

        results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap());
        results
    }

    /// Prefetch results based on a partial ASR transcript, gated by the
    /// caller's confidence threshold for the partial.
    pub async fn prefetch(
        &self,
        partial_transcript: &str,
        confidence: f32,
        vector_store: &VectorStore,
    ) -> Result<Vec<SearchResult>, RagError> {
        if confidence < self.config.prefetch_confidence_threshold {
            return Ok(Vec::new());
        }

        let keywords = Self::extract_keywords(partial_transcript);
        if keywords.is_empty() {
            return Ok(Vec::new());
        }

        let query = keywords.join(" ");
        let embedder = Arc::clone(&self.embedder);
        let embedding = tokio::task::spawn_blocking(move || embedder.embed(&query))
            .await
            .map_err(|e| RagError::Embedding(format!("embedding task failed: {e}")))?;

        let results = vector_store.search(&embedding, self.config.prefetch_top_k, None).await?;

        Ok(results
            .into_iter()
            .map(|r| SearchResult {
                id: r.id,
                content: r.content,
                score: r.score * confidence,
                metadata: r.metadata,
                source: SearchSource::Dense,
            })
            .collect())
    }

    fn extract_keywords(text: &str) -> Vec<String> {
        let stopwords: std::collections::HashSet<&str> = [
            "the", "a", "an", "is", "are", "was", "were", "be", "been", "i", "you", "we", "they",
            "it", "this", "that", "what", "which", "who", "whom", "whose", "to", "for", "in", "on",
            "at", "by", "with", "from", "and", "or", "but", "if", "then", "else",
        ]
        .into_iter()
        .collect();

        text.to_lowercase()
            .split_whitespace()
            .filter(|w| w.len() > 2 && !stopwords.contains(w))
            .map(|w| w.to_string())
            .take(5)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = RetrieverConfig::default();
        assert_eq!(config.final_top_k, 5);
    }

    #[test]
    fn test_rrf_fusion() {
        let retriever = HybridRetriever::new(RetrieverConfig::default());

        let dense = vec![
            SearchResult {
                id: "1".to_string(),
                content: "doc1".to_string(),
                score: 0.9,
                metadata: HashMap::new(),
                source: SearchSource::Dense,
            },
            SearchResult {
                id: "2".to_string(),
                content: "doc2".to_string(),
                score: 0.8,
                metadata: HashMap::new(),
                source: SearchSource::Dense,
            },
        ];

        let sparse = vec![
            SearchResult {
                id: "2".to_string(),
                content: "doc2".to_string(),
                score: 0.85,
                metadata: HashMap::new(),
                source: SearchSource::Sparse,
            },
            SearchResult {
                id: "3".to_string(),
                content: "doc3".to_string(),
                score: 0.7,
                metadata: HashMap::new(),
                source: SearchSource::Sparse,
            },
        ];

        let fused = retriever.rrf_fusion(&dense, &sparse);

        assert_eq!(fused.len(), 3);
        let doc2_result = fused.iter().find(|r| r.id == "2").unwrap();
        assert_eq!(doc2_result.source, SearchSource::Hybrid);
    }

    #[test]
    fn test_extract_keywords() {
        let keywords = HybridRetriever::extract_keywords("What is the current weather forecast?");
        assert!(!keywords.is_empty());
        assert!(keywords.contains(&"current".to_string()));
        assert!(keywords.contains(&"weather".to_string()));
    }
}
