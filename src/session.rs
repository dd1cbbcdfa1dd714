//! A loaded video: transcript, index, chain and chat history.

use crate::chunking::TranscriptChunker;
use crate::config::{ExportSettings, Prompts, Settings};
use crate::embedding::{Embedder, GeminiEmbedder};
use crate::error::Result;
use crate::gemini::create_client;
use crate::rag::{clean_answer, Answer, AnswerStyle, GeminiChatModel, LanguageModel, QaChain};
use crate::sentiment::{analyze_with_threshold, SentimentReport};
use crate::transcript::{save_transcript, OutputFormat, Transcript};
use crate::vector_store::{build_index, MemoryVectorStore, VectorStore};
use crate::youtube::{parse_video_input, TranscriptSource, VideoId, VideoMetadata, YtDlpTranscriptSource};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument};

/// The pluggable parts of a session.
pub struct SessionComponents {
    pub source: Arc<dyn TranscriptSource>,
    pub embedder: Arc<dyn Embedder>,
    pub model: Arc<dyn LanguageModel>,
    pub store: Arc<dyn VectorStore>,
}

impl SessionComponents {
    /// yt-dlp captions, Gemini embeddings and chat, and a fresh in-memory index.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let client = create_client(&settings.gemini)?;

        Ok(Self {
            source: Arc::new(YtDlpTranscriptSource::new(&settings.youtube, settings.temp_dir())),
            embedder: Arc::new(GeminiEmbedder::with_config(client.clone(), &settings.embedding)),
            model: Arc::new(GeminiChatModel::from_settings(client, &settings.rag)),
            store: Arc::new(MemoryVectorStore::new()),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One message in the chat history.
#[derive(Debug, Clone, Serialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

/// An interactive question answering session over one video.
pub struct VideoSession {
    video_id: VideoId,
    metadata: VideoMetadata,
    transcript: Transcript,
    sentiment: SentimentReport,
    chunk_count: usize,
    chain: QaChain,
    history: Vec<ChatTurn>,
    strip_prefixes: Vec<String>,
    export: ExportSettings,
}

impl VideoSession {
    /// Validate the input, fetch the transcript, score it, index it and
    /// prepare the QA chain. Any failing step aborts the load.
    #[instrument(skip(settings, components))]
    pub async fn load(input: &str, settings: &Settings, components: SessionComponents) -> Result<Self> {
        let video_id = parse_video_input(input)?;
        info!("Extracted video ID: {}", video_id);

        info!("Fetching transcript...");
        let fetched = components.source.fetch(&video_id).await?;
        info!(
            "Transcript fetched: {} segments, {} characters",
            fetched.transcript.segments.len(),
            fetched.transcript.full_text.chars().count()
        );

        let sentiment = analyze_with_threshold(
            &fetched.transcript.full_text,
            settings.sentiment.tone_threshold,
        );
        info!(
            "Sentiment: {} (polarity {:.2}, subjectivity {:.2})",
            sentiment.tone, sentiment.polarity, sentiment.subjectivity
        );

        let chunker = TranscriptChunker::from_settings(&settings.chunking)?;
        let chunks = chunker.chunk(&fetched.transcript)?;

        info!("Creating embeddings and building index...");
        let chunk_count = build_index(
            video_id.as_str(),
            chunks,
            components.embedder.as_ref(),
            components.store.as_ref(),
        )
        .await?;

        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;
        let chain = QaChain::new(components.store, components.embedder, components.model)
            .with_top_k(settings.rag.top_k)
            .with_prompts(prompts);
        info!("Chat ready using {}", chain.model_name());

        Ok(Self {
            video_id,
            metadata: fetched.metadata,
            transcript: fetched.transcript,
            sentiment,
            chunk_count,
            chain,
            history: Vec::new(),
            strip_prefixes: settings.rag.strip_prefixes.clone(),
            export: settings.export.clone(),
        })
    }

    /// Ask a question in the given style.
    ///
    /// The user turn is recorded even when answering fails.
    pub async fn ask(&mut self, question: &str, style: AnswerStyle) -> Result<Answer> {
        self.history.push(ChatTurn {
            role: Role::User,
            content: question.to_string(),
        });

        let input = style.apply(&self.chain.prompts().styles, question);
        let mut answer = self.chain.answer(&input).await?;
        answer.text = clean_answer(&answer.text, &self.strip_prefixes);

        self.history.push(ChatTurn {
            role: Role::Assistant,
            content: answer.text.clone(),
        });
        Ok(answer)
    }

    pub fn history(&self) -> &[ChatTurn] {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn video_id(&self) -> &VideoId {
        &self.video_id
    }

    pub fn metadata(&self) -> &VideoMetadata {
        &self.metadata
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn sentiment(&self) -> &SentimentReport {
        &self.sentiment
    }

    pub fn chunk_count(&self) -> usize {
        self.chunk_count
    }

    pub fn model_name(&self) -> &str {
        self.chain.model_name()
    }

    /// Write the transcript to `path`.
    pub fn save_transcript(&self, path: &Path, format: OutputFormat) -> Result<()> {
        let title = if self.metadata.title.is_empty() {
            self.video_id.as_str()
        } else {
            &self.metadata.title
        };
        save_transcript(&self.transcript, title, path, format, &self.export)?;
        info!("Saved transcript to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TubeqaError;
    use crate::rag::testing::RecordingModel;
    use crate::transcript::TranscriptSegment;
    use crate::vector_store::testing::KeywordEmbedder;
    use crate::youtube::FetchedTranscript;
    use async_trait::async_trait;

    struct FixedSource {
        segments: Vec<TranscriptSegment>,
    }

    #[async_trait]
    impl TranscriptSource for FixedSource {
        async fn fetch(&self, id: &VideoId) -> Result<FetchedTranscript> {
            Ok(FetchedTranscript {
                metadata: VideoMetadata {
                    title: "Rust in ten minutes".to_string(),
                    ..Default::default()
                },
                transcript: Transcript::new(id.to_string(), self.segments.clone()),
            })
        }
    }

    fn segments() -> Vec<TranscriptSegment> {
        vec![
            TranscriptSegment::new(0.0, 5.0, "Welcome to this great video about Rust.".into()),
            TranscriptSegment::new(5.0, 10.0, "Cargo is the build tool.".into()),
            TranscriptSegment::new(10.0, 15.0, "Ownership keeps memory safe.".into()),
        ]
    }

    fn components(model: Arc<RecordingModel>, segments: Vec<TranscriptSegment>) -> SessionComponents {
        SessionComponents {
            source: Arc::new(FixedSource { segments }),
            embedder: Arc::new(KeywordEmbedder::new(&["cargo", "owner", "rust"])),
            model,
            store: Arc::new(MemoryVectorStore::new()),
        }
    }

    #[tokio::test]
    async fn test_load_and_ask() {
        let model = Arc::new(RecordingModel::replying(
            "Based on the provided transcript context, Cargo builds Rust code.",
        ));
        let settings = Settings::default();
        let mut session = VideoSession::load(
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            &settings,
            components(model.clone(), segments()),
        )
        .await
        .unwrap();

        assert_eq!(session.video_id().as_str(), "dQw4w9WgXcQ");
        assert_eq!(session.chunk_count(), 1);
        assert_eq!(session.metadata().title, "Rust in ten minutes");

        let answer = session
            .ask("What is cargo?", AnswerStyle::BulletPoints)
            .await
            .unwrap();
        assert_eq!(answer.text, "Cargo builds Rust code.");

        let prompt = model.last_prompt().unwrap();
        assert!(prompt.contains("Question:\nAnswer using concise bullet points. What is cargo?"));

        let history = session.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role, Role::User);
        assert_eq!(history[0].content, "What is cargo?");
        assert_eq!(history[1].role, Role::Assistant);
        assert_eq!(history[1].content, "Cargo builds Rust code.");

        session.clear_history();
        assert!(session.history().is_empty());
    }

    #[tokio::test]
    async fn test_failed_answer_keeps_user_turn() {
        let model = Arc::new(RecordingModel::failing());
        let mut session = VideoSession::load("dQw4w9WgXcQ", &Settings::default(), components(model, segments()))
            .await
            .unwrap();

        let result = session.ask("Anything?", AnswerStyle::Default).await;
        assert!(matches!(result, Err(TubeqaError::Gemini(_))));
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.history()[0].role, Role::User);
    }

    #[tokio::test]
    async fn test_load_rejects_bad_input_before_fetching() {
        let model = Arc::new(RecordingModel::replying("unused"));
        let result = VideoSession::load("https://example.com/video", &Settings::default(), components(model, segments())).await;
        assert!(matches!(result, Err(TubeqaError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_load_blank_transcript_fails() {
        let model = Arc::new(RecordingModel::replying("unused"));
        let blank = vec![TranscriptSegment::new(0.0, 1.0, "   ".into())];
        let result = VideoSession::load("dQw4w9WgXcQ", &Settings::default(), components(model, blank)).await;
        assert!(matches!(result, Err(TubeqaError::EmptyTranscript)));
    }

    #[tokio::test]
    async fn test_sentiment_and_save() {
        let model = Arc::new(RecordingModel::replying("ok"));
        let session = VideoSession::load("dQw4w9WgXcQ", &Settings::default(), components(model, segments()))
            .await
            .unwrap();
        assert_eq!(session.sentiment().tone, crate::sentiment::Tone::Positive);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transcript.txt");
        session.save_transcript(&path, OutputFormat::Txt).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), session.transcript().full_text);
    }
}
