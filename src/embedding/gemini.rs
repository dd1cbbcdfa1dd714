//! Gemini embeddings through the OpenAI-compatible endpoint.

use super::Embedder;
use crate::config::EmbeddingSettings;
use crate::error::{Result, TubeqaError};
use crate::gemini::GeminiClient;
use async_openai::types::{CreateEmbeddingRequestArgs, EmbeddingInput};
use async_trait::async_trait;
use futures::stream::{self, StreamExt, TryStreamExt};
use std::future::Future;
use tracing::{debug, instrument};

/// Gemini-based embedder.
pub struct GeminiEmbedder {
    client: GeminiClient,
    model: String,
    dimensions: Option<u32>,
    batch_size: usize,
    max_concurrent: usize,
}

impl GeminiEmbedder {
    /// Create an embedder with the default model.
    pub fn new(client: GeminiClient) -> Self {
        Self::with_config(client, &EmbeddingSettings::default())
    }

    /// Create an embedder from settings.
    pub fn with_config(client: GeminiClient, settings: &EmbeddingSettings) -> Self {
        Self {
            client,
            model: settings.model.clone(),
            dimensions: settings.dimensions,
            batch_size: settings.batch_size.max(1),
            max_concurrent: settings.max_concurrent.max(1),
        }
    }

    async fn embed_chunk(&self, input: Vec<String>) -> Result<Vec<Vec<f32>>> {
        let expected = input.len();

        let mut args = CreateEmbeddingRequestArgs::default();
        args.model(&self.model).input(EmbeddingInput::StringArray(input));
        if let Some(dimensions) = self.dimensions {
            args.dimensions(dimensions);
        }
        let request = args
            .build()
            .map_err(|e| TubeqaError::Embedding(format!("Failed to build request: {}", e)))?;

        let response = self
            .client
            .embeddings()
            .create(request)
            .await
            .map_err(|e| TubeqaError::Gemini(format!("Embedding API error: {}", e)))?;

        // Sort by index to ensure correct order
        let mut data = response.data;
        data.sort_by_key(|e| e.index);

        if data.len() != expected {
            return Err(TubeqaError::Embedding(format!(
                "Expected {} embeddings, got {}",
                expected,
                data.len()
            )));
        }

        Ok(data.into_iter().map(|e| e.embedding).collect())
    }
}

#[async_trait]
impl Embedder for GeminiEmbedder {
    #[instrument(skip(self, text))]
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let embeddings = self.embed_batch(&[text.to_string()]).await?;
        embeddings
            .into_iter()
            .next()
            .ok_or_else(|| TubeqaError::Embedding("Empty embedding response".to_string()))
    }

    #[instrument(skip(self, texts), fields(count = texts.len()))]
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        debug!("Generating embeddings for {} texts", texts.len());

        let all_embeddings = embed_in_batches(texts, self.batch_size, self.max_concurrent, |batch| {
            self.embed_chunk(batch)
        })
        .await?;

        debug!("Generated {} embeddings", all_embeddings.len());
        Ok(all_embeddings)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// Split `texts` into owned batches and embed them with up to
/// `max_concurrent` requests in flight. Results keep input order.
async fn embed_in_batches<F, Fut>(
    texts: &[String],
    batch_size: usize,
    max_concurrent: usize,
    embed: F,
) -> Result<Vec<Vec<f32>>>
where
    F: FnMut(Vec<String>) -> Fut,
    Fut: Future<Output = Result<Vec<Vec<f32>>>>,
{
    let batches: Vec<Vec<String>> = texts
        .chunks(batch_size.max(1))
        .map(<[String]>::to_vec)
        .collect();

    let results: Vec<Vec<Vec<f32>>> = stream::iter(batches)
        .map(embed)
        .buffered(max_concurrent.max(1))
        .try_collect()
        .await?;

    Ok(results.into_iter().flatten().collect())
}
