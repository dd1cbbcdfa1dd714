//! The question answering chain.
//!
//! A fixed linear pipeline: retrieve the closest transcript chunks, join them
//! into a context block, fill the prompt template, call the model and return
//! its text.

use super::{Answer, LanguageModel, SourceRef};
use crate::config::Prompts;
use crate::embedding::Embedder;
use crate::error::Result;
use crate::vector_store::{SearchResult, VectorStore};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Retrieval-augmented QA chain over one video's index.
pub struct QaChain {
    vector_store: Arc<dyn VectorStore>,
    embedder: Arc<dyn Embedder>,
    model: Arc<dyn LanguageModel>,
    prompts: Prompts,
    top_k: usize,
}

impl QaChain {
    pub fn new(
        vector_store: Arc<dyn VectorStore>,
        embedder: Arc<dyn Embedder>,
        model: Arc<dyn LanguageModel>,
    ) -> Self {
        Self {
            vector_store,
            embedder,
            model,
            prompts: Prompts::default(),
            top_k: 4,
        }
    }

    /// Set the number of chunks retrieved per question.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k.max(1);
        self
    }

    /// Set custom prompts (with user-defined variables).
    pub fn with_prompts(mut self, prompts: Prompts) -> Self {
        self.prompts = prompts;
        self
    }

    pub fn prompts(&self) -> &Prompts {
        &self.prompts
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Run the chain and return only the model's reply.
    pub async fn invoke(&self, input: &str) -> Result<String> {
        Ok(self.answer(input).await?.text)
    }

    /// Run the chain and return the reply with the chunks it was based on.
    #[instrument(skip(self), fields(top_k = self.top_k))]
    pub async fn answer(&self, input: &str) -> Result<Answer> {
        info!("Answering: {}", input);

        let retrieved = self.retrieve(input).await?;
        let context = format_docs(&retrieved);
        let prompt = self.fill_prompt(&context, input);
        let text = self.model.complete(&prompt).await?;

        debug!("Answer based on {} chunks", retrieved.len());

        Ok(Answer {
            text,
            sources: retrieved.into_iter().map(SourceRef::from).collect(),
        })
    }

    async fn retrieve(&self, query: &str) -> Result<Vec<SearchResult>> {
        let query_embedding = self.embedder.embed(query).await?;
        self.vector_store.search(&query_embedding, self.top_k).await
    }

    fn fill_prompt(&self, context: &str, question: &str) -> String {
        let mut vars = HashMap::new();
        vars.insert("context".to_string(), context.to_string());
        vars.insert("question".to_string(), question.to_string());
        self.prompts.render_with_custom(&self.prompts.rag.qa, &vars)
    }
}

/// Join retrieved chunk contents with blank lines.
pub fn format_docs(results: &[SearchResult]) -> String {
    results
        .iter()
        .map(|r| r.document.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunking::ContentChunk;
    use crate::error::TubeqaError;
    use crate::rag::testing::RecordingModel;
    use crate::vector_store::testing::KeywordEmbedder;
    use crate::vector_store::{build_index, MemoryVectorStore};

    fn chunks() -> Vec<ContentChunk> {
        [
            "Ownership means each value has a single owner.",
            "Borrowing lets code use a value without taking ownership.",
            "Cargo builds the project and fetches crates.",
            "Lifetimes describe how long references stay valid.",
            "The speaker thanks the sponsors.",
        ]
        .iter()
        .enumerate()
        .map(|(i, text)| ContentChunk {
            content: text.to_string(),
            order: i as i32,
            char_offset: 0,
            start_seconds: i as f64 * 60.0,
            end_seconds: i as f64 * 60.0 + 60.0,
        })
        .collect()
    }

    async fn chain(model: Arc<RecordingModel>, top_k: usize) -> QaChain {
        let embedder = Arc::new(KeywordEmbedder::new(&[
            "owner", "borrow", "cargo", "lifetime", "sponsor",
        ]));
        let store = Arc::new(MemoryVectorStore::new());
        build_index("dQw4w9WgXcQ", chunks(), embedder.as_ref(), store.as_ref())
            .await
            .unwrap();
        QaChain::new(store, embedder, model).with_top_k(top_k)
    }

    #[tokio::test]
    async fn test_chain_fills_prompt_with_top_k_context() {
        let model = Arc::new(RecordingModel::replying("Cargo is the build tool."));
        let chain = chain(model.clone(), 2).await;

        let answer = chain.answer("What does cargo do?").await.unwrap();
        assert_eq!(answer.text, "Cargo is the build tool.");
        assert_eq!(answer.sources.len(), 2);
        assert_eq!(answer.sources[0].content, "Cargo builds the project and fetches crates.");
        assert_eq!(answer.sources[0].timestamp, "02:00");

        let prompt = model.last_prompt().unwrap();
        assert!(prompt.contains("context:\nCargo builds the project and fetches crates.\n\n"));
        assert!(prompt.contains("Question:\nWhat does cargo do?\n\nAnswer:"));
        assert!(!prompt.contains("{{"));
    }

    #[tokio::test]
    async fn test_default_top_k_is_four() {
        let model = Arc::new(RecordingModel::replying("ok"));
        let embedder = Arc::new(KeywordEmbedder::new(&["owner"]));
        let store = Arc::new(MemoryVectorStore::new());
        build_index("vid", chunks(), embedder.as_ref(), store.as_ref()).await.unwrap();

        let chain = QaChain::new(store, embedder, model);
        let answer = chain.answer("owner?").await.unwrap();
        assert_eq!(answer.sources.len(), 4);
    }

    #[tokio::test]
    async fn test_model_error_propagates() {
        let model = Arc::new(RecordingModel::failing());
        let chain = chain(model, 4).await;
        let result = chain.invoke("Anything?").await;
        assert!(matches!(result, Err(TubeqaError::Gemini(_))));
    }

    #[test]
    fn test_format_docs_empty() {
        assert_eq!(format_docs(&[]), "");
    }
}
