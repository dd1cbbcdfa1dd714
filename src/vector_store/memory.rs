//! In-memory vector store implementation.
//!
//! Brute-force cosine search; a single video's transcript is small enough.

use super::{cosine_similarity, Document, SearchResult, VectorStore};
use crate::error::{Result, TubeqaError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory vector store.
pub struct MemoryVectorStore {
    documents: RwLock<HashMap<String, Document>>,
}

impl MemoryVectorStore {
    /// Create a new in-memory vector store.
    pub fn new() -> Self {
        Self {
            documents: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryVectorStore {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned<T>(_: T) -> TubeqaError {
    TubeqaError::VectorStore("Vector store lock poisoned".to_string())
}

#[async_trait]
impl VectorStore for MemoryVectorStore {
    async fn upsert_batch(&self, docs: &[Document]) -> Result<usize> {
        let mut store = self.documents.write().map_err(poisoned)?;
        for doc in docs {
            store.insert(doc.id.to_string(), doc.clone());
        }
        Ok(docs.len())
    }

    async fn search(&self, query_embedding: &[f32], limit: usize) -> Result<Vec<SearchResult>> {
        self.search_with_threshold(query_embedding, limit, f32::NEG_INFINITY).await
    }

    async fn search_with_threshold(
        &self,
        query_embedding: &[f32],
        limit: usize,
        min_score: f32,
    ) -> Result<Vec<SearchResult>> {
        let docs = self.documents.read().map_err(poisoned)?;

        let mut results: Vec<SearchResult> = docs
            .values()
            .map(|doc| SearchResult {
                score: cosine_similarity(query_embedding, &doc.embedding),
                document: doc.clone(),
            })
            .filter(|r| r.score >= min_score)
            .collect();

        // Ties fall back to transcript order so results are deterministic.
        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.document.chunk_order.cmp(&b.document.chunk_order))
        });
        results.truncate(limit);

        Ok(results)
    }

    async fn get_by_video_id(&self, video_id: &str) -> Result<Vec<Document>> {
        let docs = self.documents.read().map_err(poisoned)?;
        let mut result: Vec<Document> = docs
            .values()
            .filter(|d| d.video_id == video_id)
            .cloned()
            .collect();
        result.sort_by_key(|d| d.chunk_order);
        Ok(result)
    }

    async fn document_count(&self) -> Result<usize> {
        let docs = self.documents.read().map_err(poisoned)?;
        Ok(docs.len())
    }

    async fn clear(&self) -> Result<()> {
        self.documents.write().map_err(poisoned)?.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunking::ContentChunk;

    fn doc(content: &str, order: i32, embedding: Vec<f32>) -> Document {
        Document::from_chunk(
            "video1",
            ContentChunk {
                content: content.to_string(),
                order,
                char_offset: 0,
                start_seconds: order as f64 * 30.0,
                end_seconds: order as f64 * 30.0 + 30.0,
            },
            embedding,
        )
    }

    #[tokio::test]
    async fn test_memory_vector_store() {
        let store = MemoryVectorStore::new();

        store
            .upsert_batch(&[
                doc("Hello world", 0, vec![1.0, 0.0, 0.0]),
                doc("Goodbye world", 1, vec![0.0, 1.0, 0.0]),
                doc("Hello again", 2, vec![0.9, 0.1, 0.0]),
            ])
            .await
            .unwrap();

        assert_eq!(store.document_count().await.unwrap(), 3);

        let results = store.search(&[1.0, 0.0, 0.0], 2).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].document.content, "Hello world");
        assert_eq!(results[1].document.content, "Hello again");
        assert!(results[0].score >= results[1].score);

        let filtered = store.search_with_threshold(&[1.0, 0.0, 0.0], 10, 0.5).await.unwrap();
        assert_eq!(filtered.len(), 2);

        let docs = store.get_by_video_id("video1").await.unwrap();
        assert_eq!(docs.iter().map(|d| d.chunk_order).collect::<Vec<_>>(), vec![0, 1, 2]);

        store.clear().await.unwrap();
        assert_eq!(store.document_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_ties_keep_transcript_order() {
        let store = MemoryVectorStore::new();
        store
            .upsert_batch(&[
                doc("b", 1, vec![1.0, 0.0]),
                doc("a", 0, vec![1.0, 0.0]),
                doc("c", 2, vec![1.0, 0.0]),
            ])
            .await
            .unwrap();

        let results = tokio_test::assert_ok!(store.search(&[1.0, 0.0], 3).await);
        let order: Vec<i32> = results.iter().map(|r| r.document.chunk_order).collect();
        assert_eq!(order, vec![0, 1, 2]);
    }
}
