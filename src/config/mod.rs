//! Configuration module for tubeqa.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{Prompts, RagPrompts, StylePrompts};
pub use settings::{
    ChunkingSettings, EmbeddingSettings, ExportSettings, GeminiSettings, GeneralSettings,
    PromptSettings, RagSettings, SentimentSettings, Settings, YoutubeSettings,
};
