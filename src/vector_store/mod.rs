//! Vector store abstraction for tubeqa.
//!
//! Holds the embedded transcript chunks of the current session and answers
//! nearest-neighbour queries by cosine similarity.

mod memory;

pub use memory::MemoryVectorStore;

use crate::chunking::ContentChunk;
use crate::embedding::Embedder;
use crate::error::{Result, TubeqaError};
use crate::transcript::format_timestamp;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

/// A document stored in the vector index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Unique document ID.
    pub id: Uuid,
    /// Video ID this document belongs to.
    pub video_id: String,
    /// Text content of this chunk.
    pub content: String,
    /// Start time in the video (seconds).
    pub start_seconds: f64,
    /// End time in the video (seconds).
    pub end_seconds: f64,
    /// Order of this chunk in the transcript.
    pub chunk_order: i32,
    /// Embedding vector.
    pub embedding: Vec<f32>,
    /// When this document was indexed.
    pub indexed_at: DateTime<Utc>,
}

impl Document {
    /// Create a document from a chunk and its embedding.
    pub fn from_chunk(video_id: &str, chunk: ContentChunk, embedding: Vec<f32>) -> Self {
        Self {
            id: Uuid::new_v4(),
            video_id: video_id.to_string(),
            content: chunk.content,
            start_seconds: chunk.start_seconds,
            end_seconds: chunk.end_seconds,
            chunk_order: chunk.order,
            embedding,
            indexed_at: Utc::now(),
        }
    }

    /// Format timestamp for display.
    pub fn format_timestamp(&self) -> String {
        format_timestamp(self.start_seconds)
    }
}

/// A search result with score.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The matched document.
    pub document: Document,
    /// Similarity score (higher is better).
    pub score: f32,
}

/// Trait for vector store implementations.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Bulk upsert documents.
    async fn upsert_batch(&self, docs: &[Document]) -> Result<usize>;

    /// Search for the `limit` most similar documents.
    async fn search(&self, query_embedding: &[f32], limit: usize) -> Result<Vec<SearchResult>>;

    /// Search with a minimum similarity threshold.
    async fn search_with_threshold(
        &self,
        query_embedding: &[f32],
        limit: usize,
        min_score: f32,
    ) -> Result<Vec<SearchResult>>;

    /// Get all documents for a video, in chunk order.
    async fn get_by_video_id(&self, video_id: &str) -> Result<Vec<Document>>;

    /// Get total document count.
    async fn document_count(&self) -> Result<usize>;

    /// Remove every document.
    async fn clear(&self) -> Result<()>;
}

/// Embed chunks and add them to the store.
///
/// Returns the number of documents indexed.
#[instrument(skip(chunks, embedder, store), fields(chunks = chunks.len()))]
pub async fn build_index(
    video_id: &str,
    chunks: Vec<ContentChunk>,
    embedder: &dyn Embedder,
    store: &dyn VectorStore,
) -> Result<usize> {
    if chunks.is_empty() {
        return Err(TubeqaError::VectorStore(
            "No valid document chunks were created from the transcript.".to_string(),
        ));
    }

    let texts: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();
    let embeddings = embedder.embed_batch(&texts).await?;

    if embeddings.len() != chunks.len() {
        return Err(TubeqaError::Embedding(format!(
            "Got {} embeddings for {} chunks",
            embeddings.len(),
            chunks.len()
        )));
    }

    let documents: Vec<Document> = chunks
        .into_iter()
        .zip(embeddings)
        .map(|(chunk, embedding)| Document::from_chunk(video_id, chunk, embedding))
        .collect();

    let count = store.upsert_batch(&documents).await?;
    info!("Indexed {} chunks with {}", count, embedder.model());
    Ok(count)
}

/// Compute cosine similarity between two vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}

#[cfg(test)]
pub(crate) mod testing {
    //! Deterministic embedder for tests.

    use super::*;

    /// Embeds text as keyword counts over a fixed vocabulary.
    pub struct KeywordEmbedder {
        pub vocabulary: Vec<&'static str>,
    }

    impl KeywordEmbedder {
        pub fn new(vocabulary: &[&'static str]) -> Self {
            Self {
                vocabulary: vocabulary.to_vec(),
            }
        }

        fn vectorize(&self, text: &str) -> Vec<f32> {
            let lower = text.to_lowercase();
            self.vocabulary
                .iter()
                .map(|word| lower.matches(word).count() as f32)
                .collect()
        }
    }

    #[async_trait]
    impl Embedder for KeywordEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>> {
            Ok(self.vectorize(text))
        }

        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Ok(texts.iter().map(|t| self.vectorize(t)).collect())
        }

        fn model(&self) -> &str {
            "keyword-test"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::KeywordEmbedder;
    use super::*;

    fn chunk(content: &str, order: i32) -> ContentChunk {
        ContentChunk {
            content: content.to_string(),
            order,
            char_offset: 0,
            start_seconds: order as f64 * 30.0,
            end_seconds: order as f64 * 30.0 + 30.0,
        }
    }

    #[test]
    fn test_cosine_similarity() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![1.0, 0.0, 0.0];
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 0.001);

        let c = vec![0.0, 1.0, 0.0];
        assert!((cosine_similarity(&a, &c)).abs() < 0.001);

        let d = vec![-1.0, 0.0, 0.0];
        assert!((cosine_similarity(&a, &d) + 1.0).abs() < 0.001);

        assert_eq!(cosine_similarity(&a, &[1.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&a, &[0.0, 0.0, 0.0]), 0.0);
    }

    #[tokio::test]
    async fn test_build_index() {
        let embedder = KeywordEmbedder::new(&["rust", "python"]);
        let store = MemoryVectorStore::new();

        let count = build_index(
            "vid",
            vec![chunk("Rust is fast", 0), chunk("Python is popular", 1)],
            &embedder,
            &store,
        )
        .await
        .unwrap();

        assert_eq!(count, 2);
        let docs = store.get_by_video_id("vid").await.unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[1].format_timestamp(), "00:30");
    }

    #[tokio::test]
    async fn test_build_index_rejects_empty() {
        let embedder = KeywordEmbedder::new(&["rust"]);
        let store = MemoryVectorStore::new();
        let result = build_index("vid", Vec::new(), &embedder, &store).await;
        assert!(matches!(result, Err(TubeqaError::VectorStore(_))));
    }
}
