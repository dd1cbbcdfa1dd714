//! Transcript chunking for retrieval.
//!
//! Splits the transcript's full text into overlapping character windows and
//! maps each window back to the caption segments it came from, so answers can
//! cite a position in the video.

use crate::config::ChunkingSettings;
use crate::error::{Result, TubeqaError};
use crate::transcript::{format_timestamp, Transcript};
use serde::{Deserialize, Serialize};
use text_splitter::{Characters, ChunkConfig, TextSplitter};
use tracing::debug;

/// A chunk of transcript text ready for embedding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentChunk {
    /// Text content of this chunk.
    pub content: String,
    /// Order of this chunk in the transcript.
    pub order: i32,
    /// Character offset of the chunk in the transcript's full text.
    pub char_offset: usize,
    /// Start time of the first caption segment covered.
    pub start_seconds: f64,
    /// End time of the last caption segment covered.
    pub end_seconds: f64,
}

impl ContentChunk {
    /// Format timestamp for display.
    pub fn format_timestamp(&self) -> String {
        format_timestamp(self.start_seconds)
    }
}

/// Splits transcripts into overlapping chunks.
pub struct TranscriptChunker {
    splitter: TextSplitter<Characters>,
}

impl TranscriptChunker {
    /// Create a chunker with explicit parameters.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(TubeqaError::Config("chunk size must be positive".into()));
        }
        if chunk_overlap >= chunk_size {
            return Err(TubeqaError::Config(format!(
                "chunk overlap ({}) must be smaller than chunk size ({})",
                chunk_overlap, chunk_size
            )));
        }
        let config = ChunkConfig::new(chunk_size)
            .with_overlap(chunk_overlap)
            .map_err(|e| TubeqaError::Config(e.to_string()))?;
        Ok(Self {
            splitter: TextSplitter::new(config),
        })
    }

    /// Create a chunker from settings.
    pub fn from_settings(settings: &ChunkingSettings) -> Result<Self> {
        Self::new(settings.chunk_size, settings.chunk_overlap)
    }

    /// Split a transcript into chunks.
    pub fn chunk(&self, transcript: &Transcript) -> Result<Vec<ContentChunk>> {
        if transcript.is_blank() {
            return Err(TubeqaError::EmptyTranscript);
        }

        let chunks: Vec<ContentChunk> = self
            .splitter
            .chunk_char_indices(&transcript.full_text)
            .enumerate()
            .map(|(order, span)| {
                let char_len = span.chunk.chars().count();
                let last_char = span.char_offset + char_len.saturating_sub(1);
                let start_seconds = transcript
                    .segment_at_offset(span.char_offset)
                    .map(|s| s.start_seconds)
                    .unwrap_or(0.0);
                let end_seconds = transcript
                    .segment_at_offset(last_char)
                    .map(|s| s.end_seconds)
                    .unwrap_or(start_seconds);

                ContentChunk {
                    content: span.chunk.to_string(),
                    order: order as i32,
                    char_offset: span.char_offset,
                    start_seconds,
                    end_seconds,
                }
            })
            .collect();

        if chunks.is_empty() {
            return Err(TubeqaError::EmptyTranscript);
        }

        debug!("Created {} chunks from transcript {}", chunks.len(), transcript.video_id);
        Ok(chunks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::TranscriptSegment;

    fn transcript(texts: &[&str]) -> Transcript {
        let segments = texts
            .iter()
            .enumerate()
            .map(|(i, t)| TranscriptSegment::new(i as f64 * 10.0, i as f64 * 10.0 + 10.0, t.to_string()))
            .collect();
        Transcript::new("vid".to_string(), segments)
    }

    #[test]
    fn test_empty_transcript_is_error() {
        let chunker = TranscriptChunker::from_settings(&ChunkingSettings::default()).unwrap();
        let result = chunker.chunk(&transcript(&["   ", ""]));
        assert!(matches!(result, Err(TubeqaError::EmptyTranscript)));
    }

    #[test]
    fn test_invalid_overlap() {
        assert!(TranscriptChunker::new(100, 100).is_err());
        assert!(TranscriptChunker::new(0, 0).is_err());
    }

    #[test]
    fn test_chunk_timestamps_follow_segments() {
        let texts: Vec<String> = (0..12).map(|i| format!("segment number {:02} talks about topic", i)).collect();
        let refs: Vec<&str> = texts.iter().map(|s| s.as_str()).collect();
        let transcript = transcript(&refs);

        let chunker = TranscriptChunker::new(120, 30).unwrap();
        let chunks = chunker.chunk(&transcript).unwrap();

        assert!(chunks.len() > 1);
        assert_eq!(chunks[0].start_seconds, 0.0);
        assert_eq!(chunks[0].order, 0);
        for chunk in &chunks {
            assert!(chunk.end_seconds > chunk.start_seconds);
        }
        let last = chunks.last().unwrap();
        assert_eq!(last.end_seconds, 120.0);
        assert!(chunks.windows(2).all(|w| w[0].start_seconds <= w[1].start_seconds));
    }

    #[test]
    fn test_chunks_respect_size_and_offsets() {
        let texts: Vec<String> = (0..40).map(|i| format!("sentence {} about borrowing.", i)).collect();
        let refs: Vec<&str> = texts.iter().map(|s| s.as_str()).collect();
        let transcript = transcript(&refs);

        let chunker = TranscriptChunker::new(100, 20).unwrap();
        let chunks = chunker.chunk(&transcript).unwrap();

        let chars: Vec<char> = transcript.full_text.chars().collect();
        for chunk in &chunks {
            let len = chunk.content.chars().count();
            assert!(len <= 100);
            let at_offset: String = chars[chunk.char_offset..chunk.char_offset + len].iter().collect();
            assert_eq!(at_offset, chunk.content);
        }
        assert!(chunks.windows(2).all(|w| w[0].char_offset < w[1].char_offset));
    }

    #[test]
    fn test_short_transcript_single_chunk() {
        let chunker = TranscriptChunker::from_settings(&ChunkingSettings::default()).unwrap();
        let chunks = chunker.chunk(&transcript(&["hello", "world"])).unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].content, "hello world");
        assert_eq!(chunks[0].format_timestamp(), "00:00");
        assert_eq!(chunks[0].end_seconds, 20.0);
    }
}
