//! Chat model used for answer generation.

use crate::config::RagSettings;
use crate::error::{Result, TubeqaError};
use crate::gemini::GeminiClient;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs, CreateChatCompletionResponse,
};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// A text-in, text-out language model.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Send a filled prompt and return the model's reply text.
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Model identifier.
    fn name(&self) -> &str;
}

/// Gemini chat model via the OpenAI-compatible chat completions endpoint.
pub struct GeminiChatModel {
    client: GeminiClient,
    model: String,
    temperature: f32,
}

impl GeminiChatModel {
    pub fn new(client: GeminiClient, model: &str, temperature: f32) -> Self {
        Self {
            client,
            model: model.to_string(),
            temperature,
        }
    }

    pub fn from_settings(client: GeminiClient, settings: &RagSettings) -> Self {
        Self::new(client, &settings.model, settings.temperature)
    }
}

#[async_trait]
impl LanguageModel for GeminiChatModel {
    #[instrument(skip(self, prompt), fields(model = %self.model, prompt_chars = prompt.len()))]
    async fn complete(&self, prompt: &str) -> Result<String> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()
                .map_err(|e| TubeqaError::Rag(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(self.temperature)
            .build()
            .map_err(|e| TubeqaError::Rag(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| TubeqaError::Gemini(format!("Failed to generate response: {}", e)))?;

        let answer = reply_text(response)?;

        debug!("Model returned {} characters", answer.len());
        Ok(answer)
    }

    fn name(&self) -> &str {
        &self.model
    }
}

/// Take the first choice's text. A missing or blank reply is an error.
fn reply_text(response: CreateChatCompletionResponse) -> Result<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| TubeqaError::Rag("Empty response from model".to_string()))
}
