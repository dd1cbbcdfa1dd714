//! Gemini client configuration.
//!
//! Gemini is reached through its OpenAI-compatible endpoint, so the
//! `async-openai` client is reused with a different base URL and key.

use crate::config::GeminiSettings;
use crate::error::{Result, TubeqaError};
use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;

/// Client type shared by the embedder and the chat model.
pub type GeminiClient = Client<OpenAIConfig>;

/// Create a Gemini client from settings, reading the key from the environment.
pub fn create_client(settings: &GeminiSettings) -> Result<GeminiClient> {
    let api_key = settings.api_key()?;
    create_client_with_key(
        &settings.api_base,
        &api_key,
        Duration::from_secs(settings.timeout_secs),
    )
}

/// Create a Gemini client with an explicit key and timeout.
pub fn create_client_with_key(api_base: &str, api_key: &str, timeout: Duration) -> Result<GeminiClient> {
    let http_client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| TubeqaError::Config(format!("Failed to create HTTP client: {}", e)))?;

    let config = OpenAIConfig::new()
        .with_api_base(api_base.trim_end_matches('/'))
        .with_api_key(api_key);

    Ok(Client::with_config(config).with_http_client(http_client))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_config_error() {
        let settings = GeminiSettings {
            api_key_env: "TUBEQA_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            ..GeminiSettings::default()
        };
        assert!(matches!(create_client(&settings), Err(TubeqaError::Config(_))));
    }

    #[test]
    fn test_client_with_explicit_key() {
        let client = create_client_with_key(
            "https://generativelanguage.googleapis.com/v1beta/openai/",
            "test-key",
            Duration::from_secs(5),
        );
        assert!(client.is_ok());
    }
}
