//! Data models for video transcripts.

use serde::{Deserialize, Serialize};

/// A complete transcript with segments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    /// Video ID this transcript belongs to.
    pub video_id: String,
    /// Individual caption segments with timestamps.
    pub segments: Vec<TranscriptSegment>,
    /// Full transcript text (segments joined by single spaces).
    pub full_text: String,
    /// Total duration in seconds.
    pub duration_seconds: f64,
}

impl Transcript {
    /// Create a new transcript from segments.
    pub fn new(video_id: String, segments: Vec<TranscriptSegment>) -> Self {
        let full_text = segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        let duration_seconds = segments
            .iter()
            .map(|s| s.end_seconds)
            .fold(0.0f64, f64::max);

        Self {
            video_id,
            segments,
            full_text,
            duration_seconds,
        }
    }

    /// Whether the transcript has any non-whitespace text.
    pub fn is_blank(&self) -> bool {
        self.full_text.trim().is_empty()
    }

    /// Find the segment containing a character offset into `full_text`.
    ///
    /// Offsets count Unicode scalar values. The separating space after a
    /// segment belongs to that segment; offsets past the end map to the last one.
    pub fn segment_at_offset(&self, char_offset: usize) -> Option<&TranscriptSegment> {
        let mut end = 0usize;
        for segment in &self.segments {
            end += segment.text.chars().count() + 1;
            if char_offset < end {
                return Some(segment);
            }
        }
        self.segments.last()
    }
}

/// A single caption segment with timestamp information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Start time in seconds.
    pub start_seconds: f64,
    /// End time in seconds.
    pub end_seconds: f64,
    /// Caption text.
    pub text: String,
}

impl TranscriptSegment {
    pub fn new(start_seconds: f64, end_seconds: f64, text: String) -> Self {
        Self {
            start_seconds,
            end_seconds,
            text,
        }
    }
}

/// Format seconds as MM:SS or HH:MM:SS.
pub fn format_timestamp(seconds: f64) -> String {
    let total_seconds = seconds.max(0.0) as u32;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}
