//! YouTube input handling and transcript sources.
//!
//! Validates user input, extracts the 11-character video ID and fetches the
//! transcript through a [`TranscriptSource`].

mod ytdlp;

pub use ytdlp::YtDlpTranscriptSource;

use crate::error::{Result, TubeqaError};
use crate::transcript::Transcript;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(https?://)?(www\.|m\.)?(youtube\.com|youtu\.?be)/.+$").expect("valid regex")
});

static ID_IN_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:v=|/)([0-9A-Za-z_-]{11})").expect("valid regex"));

static BARE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9A-Za-z_-]{11}$").expect("valid regex"));

/// An 11-character YouTube video ID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VideoId(String);

impl VideoId {
    /// Wrap a string that is already known to be a bare video ID.
    pub fn parse(id: &str) -> Option<Self> {
        BARE_ID.is_match(id).then(|| Self(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Check whether input looks like a YouTube URL.
pub fn is_valid_youtube_url(url: &str) -> bool {
    URL_PATTERN.is_match(url.trim())
}

/// Extract the video ID from a URL such as `watch?v=<id>` or `youtu.be/<id>`.
pub fn extract_video_id(input: &str) -> Option<VideoId> {
    ID_IN_URL
        .captures(input.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| VideoId(m.as_str().to_string()))
}

/// Turn user input (URL or bare ID) into a video ID.
pub fn parse_video_input(input: &str) -> Result<VideoId> {
    let input = input.trim();

    if input.is_empty() {
        return Err(TubeqaError::InvalidInput(
            "Please enter a valid YouTube video URL or ID.".to_string(),
        ));
    }

    if let Some(id) = VideoId::parse(input) {
        return Ok(id);
    }

    if !is_valid_youtube_url(input) {
        return Err(TubeqaError::InvalidInput("Invalid YouTube URL.".to_string()));
    }

    extract_video_id(input).ok_or_else(|| {
        TubeqaError::InvalidInput("Could not extract a valid YouTube video ID.".to_string())
    })
}

/// Canonical watch URL for a video.
pub fn watch_url(id: &VideoId) -> String {
    format!("https://www.youtube.com/watch?v={}", id)
}

/// Watch URL that starts playback at `seconds`.
pub fn watch_url_at(id: &VideoId, seconds: f64) -> String {
    let start = format!("{}s", seconds.max(0.0) as u32);
    url::Url::parse_with_params(
        "https://www.youtube.com/watch",
        &[("v", id.as_str()), ("t", start.as_str())],
    )
    .map(|u| u.to_string())
    .unwrap_or_else(|_| format!("{}&t={}", watch_url(id), start))
}

/// Metadata about a video, as reported alongside its captions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub title: String,
    pub channel: Option<String>,
    pub duration_seconds: Option<u32>,
    pub published_at: Option<DateTime<Utc>>,
}

/// A transcript together with the video's metadata.
#[derive(Debug, Clone)]
pub struct FetchedTranscript {
    pub metadata: VideoMetadata,
    pub transcript: Transcript,
}

/// Trait for transcript providers.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Fetch the transcript for a video.
    async fn fetch(&self, id: &VideoId) -> Result<FetchedTranscript>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_youtube_url() {
        assert!(is_valid_youtube_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ"));
        assert!(is_valid_youtube_url("youtu.be/dQw4w9WgXcQ"));
        assert!(is_valid_youtube_url("  http://youtube.com/embed/dQw4w9WgXcQ  "));
        assert!(is_valid_youtube_url("https://m.youtube.com/watch?v=dQw4w9WgXcQ"));
        assert!(!is_valid_youtube_url("https://vimeo.com/123456"));
        assert!(!is_valid_youtube_url("https://www.youtube.com/"));
    }

    #[test]
    fn test_extract_video_id() {
        let expected = Some(VideoId("dQw4w9WgXcQ".to_string()));
        assert_eq!(extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"), expected);
        assert_eq!(extract_video_id("https://youtu.be/dQw4w9WgXcQ?si=abc"), expected);
        assert_eq!(extract_video_id("https://youtube.com/embed/dQw4w9WgXcQ"), expected);
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?list=PL1&v=dQw4w9WgXcQ"),
            expected
        );
        assert_eq!(extract_video_id("https://www.youtube.com/watch?v=short"), None);
    }

    #[test]
    fn test_parse_video_input_order_of_checks() {
        assert_eq!(parse_video_input("dQw4w9WgXcQ").unwrap().as_str(), "dQw4w9WgXcQ");
        assert_eq!(
            parse_video_input(" https://youtu.be/dQw4w9WgXcQ ").unwrap().as_str(),
            "dQw4w9WgXcQ"
        );

        let empty = parse_video_input("   ").unwrap_err().to_string();
        assert!(empty.contains("Please enter a valid YouTube video URL or ID."));

        let invalid = parse_video_input("https://example.com/watch?v=dQw4w9WgXcQ")
            .unwrap_err()
            .to_string();
        assert!(invalid.contains("Invalid YouTube URL."));

        let no_id = parse_video_input("https://www.youtube.com/@somechannel")
            .unwrap_err()
            .to_string();
        assert!(no_id.contains("Could not extract a valid YouTube video ID."));
    }

    #[test]
    fn test_watch_urls() {
        let id = VideoId::parse("dQw4w9WgXcQ").unwrap();
        assert_eq!(watch_url(&id), "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
        assert_eq!(
            watch_url_at(&id, 125.7),
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=125s"
        );
    }
}
