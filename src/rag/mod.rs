//! Retrieval-augmented question answering over a video transcript.

mod chain;
mod model;
mod style;

pub use chain::{format_docs, QaChain};
pub use model::{GeminiChatModel, LanguageModel};
pub use style::AnswerStyle;

use crate::vector_store::SearchResult;
use crate::youtube::{watch_url_at, VideoId};

/// A transcript chunk an answer was based on.
#[derive(Debug, Clone)]
pub struct SourceRef {
    /// Video ID.
    pub video_id: String,
    /// Formatted timestamp (e.g., "02:34").
    pub timestamp: String,
    /// Start time in seconds.
    pub start_seconds: f64,
    /// Text content.
    pub content: String,
    /// Similarity score.
    pub score: f32,
    /// Watch URL at the chunk's timestamp.
    pub url: Option<String>,
}

impl From<SearchResult> for SourceRef {
    fn from(result: SearchResult) -> Self {
        let url = VideoId::parse(&result.document.video_id)
            .map(|id| watch_url_at(&id, result.document.start_seconds));

        Self {
            timestamp: result.document.format_timestamp(),
            start_seconds: result.document.start_seconds,
            video_id: result.document.video_id,
            content: result.document.content,
            score: result.score,
            url,
        }
    }
}

/// A model answer with its supporting chunks.
#[derive(Debug, Clone)]
pub struct Answer {
    pub text: String,
    pub sources: Vec<SourceRef>,
}

/// Remove a boilerplate opening such as "Based on the provided transcript context,".
pub fn clean_answer(answer: &str, prefixes: &[String]) -> String {
    let trimmed = answer.trim();
    for prefix in prefixes.iter().filter(|p| !p.is_empty()) {
        if let Some(rest) = trimmed.strip_prefix(prefix.as_str()) {
            return rest.trim().to_string();
        }
    }
    trimmed.to_string()
}
