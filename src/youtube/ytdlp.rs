//! Transcript fetching via yt-dlp.
//!
//! Downloads subtitle tracks (manual or auto-generated) in `json3` format
//! together with the video's info JSON, without downloading any media.

use super::{watch_url, FetchedTranscript, TranscriptSource, VideoId, VideoMetadata};
use crate::config::YoutubeSettings;
use crate::error::{Result, TubeqaError};
use crate::transcript::{Transcript, TranscriptSegment};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info, instrument, warn};

/// Transcript source backed by the `yt-dlp` executable.
pub struct YtDlpTranscriptSource {
    binary: String,
    sub_langs: String,
    max_duration_seconds: u32,
    temp_root: PathBuf,
}

impl YtDlpTranscriptSource {
    pub fn new(settings: &YoutubeSettings, temp_root: PathBuf) -> Self {
        Self {
            binary: "yt-dlp".to_string(),
            sub_langs: settings.sub_langs.clone(),
            max_duration_seconds: settings.max_duration_seconds,
            temp_root,
        }
    }

    /// Use a different yt-dlp executable.
    pub fn with_binary(mut self, binary: &str) -> Self {
        self.binary = binary.to_string();
        self
    }

    async fn download_captions(&self, id: &VideoId, dir: &Path) -> Result<()> {
        let template = dir.join(format!("{}.%(ext)s", id));

        let result = Command::new(&self.binary)
            .arg("--skip-download")
            .arg("--write-subs")
            .arg("--write-auto-subs")
            .arg("--sub-langs").arg(&self.sub_langs)
            .arg("--sub-format").arg("json3")
            .arg("--write-info-json")
            .arg("--output").arg(template.to_string_lossy().as_ref())
            .arg("--no-playlist")
            .arg("--quiet")
            .arg("--no-warnings")
            .arg(watch_url(id))
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await;

        let output = match result {
            Ok(o) => o,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(TubeqaError::ToolNotFound(self.binary.clone()));
            }
            Err(e) => {
                return Err(TubeqaError::ToolFailed(format!("yt-dlp execution failed: {e}")));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if stderr.contains("Video unavailable") || stderr.contains("Private video") {
                return Err(TubeqaError::VideoNotFound(format!("{}: {}", id, stderr.trim())));
            }
            return Err(TubeqaError::ToolFailed(format!("yt-dlp failed: {}", stderr.trim())));
        }

        Ok(())
    }
}

#[async_trait]
impl TranscriptSource for YtDlpTranscriptSource {
    #[instrument(skip(self), fields(video_id = %id))]
    async fn fetch(&self, id: &VideoId) -> Result<FetchedTranscript> {
        std::fs::create_dir_all(&self.temp_root)?;
        let workdir = tempfile::Builder::new()
            .prefix("captions-")
            .tempdir_in(&self.temp_root)?;

        info!("Fetching captions for {}", id);
        self.download_captions(id, workdir.path()).await?;

        let info_path = workdir.path().join(format!("{}.info.json", id));
        let (metadata, manual_langs) = match std::fs::read_to_string(&info_path) {
            Ok(content) => (parse_info_json(&content)?, manual_caption_languages(&content)?),
            Err(e) => {
                warn!("No info JSON written by yt-dlp: {}", e);
                let metadata = VideoMetadata {
                    title: id.to_string(),
                    ..VideoMetadata::default()
                };
                (metadata, HashSet::new())
            }
        };

        if let Some(duration) = metadata.duration_seconds {
            if duration > self.max_duration_seconds {
                return Err(TubeqaError::InvalidInput(format!(
                    "Video duration ({} seconds) exceeds maximum ({} seconds)",
                    duration, self.max_duration_seconds
                )));
            }
        }

        let caption_path = pick_caption_file(workdir.path(), id, &manual_langs)?.ok_or_else(|| {
            TubeqaError::TranscriptUnavailable(format!("no captions available for {}", id))
        })?;
        debug!("Using caption track {:?}", caption_path);

        let content = std::fs::read_to_string(&caption_path)?;
        let segments = parse_json3(&content)?;
        if segments.is_empty() {
            return Err(TubeqaError::TranscriptUnavailable(format!(
                "caption track for {} has no text",
                id
            )));
        }

        info!("Fetched {} caption segments for '{}'", segments.len(), metadata.title);

        Ok(FetchedTranscript {
            metadata,
            transcript: Transcript::new(id.to_string(), segments),
        })
    }
}

/// Choose the best caption file written for a video.
///
/// Files are named `<id>.<lang>.json3`. Manually authored tracks (the
/// languages in `manual_langs`) beat auto-generated ones. Within each group
/// a plain `en` track is preferred, then other English variants, then
/// anything else, by name.
fn pick_caption_file(dir: &Path, id: &VideoId, manual_langs: &HashSet<String>) -> Result<Option<PathBuf>> {
    let prefix = format!("{}.", id);
    let mut candidates: Vec<(bool, u8, String, PathBuf)> = Vec::new();

    for entry in std::fs::read_dir(dir)?.flatten() {
        let name = entry.file_name().to_string_lossy().to_string();
        let Some(lang) = name
            .strip_prefix(&prefix)
            .and_then(|rest| rest.strip_suffix(".json3"))
        else {
            continue;
        };

        let rank = match lang {
            "en" => 0,
            l if l.starts_with("en") && !l.contains("-orig") => 1,
            l if l.starts_with("en") => 2,
            _ => 3,
        };
        let auto = !manual_langs.contains(lang);
        candidates.push((auto, rank, name.clone(), entry.path()));
    }

    candidates.sort();
    Ok(candidates.into_iter().next().map(|(_, _, _, path)| path))
}

/// Languages with manually authored subtitles, from the info JSON's
/// `subtitles` map. Auto-generated tracks live under `automatic_captions`.
pub(crate) fn manual_caption_languages(content: &str) -> Result<HashSet<String>> {
    let json: serde_json::Value = serde_json::from_str(content)?;
    Ok(json["subtitles"]
        .as_object()
        .map(|subs| subs.keys().cloned().collect())
        .unwrap_or_default())
}

#[derive(Debug, Deserialize)]
struct Json3Captions {
    #[serde(default)]
    events: Vec<Json3Event>,
}

#[derive(Debug, Deserialize)]
struct Json3Event {
    #[serde(rename = "tStartMs", default)]
    start_ms: u64,
    #[serde(rename = "dDurationMs", default)]
    duration_ms: u64,
    #[serde(default)]
    segs: Vec<Json3Seg>,
}

#[derive(Debug, Deserialize)]
struct Json3Seg {
    #[serde(default)]
    utf8: String,
}

/// Parse a YouTube `json3` caption track into transcript segments.
pub(crate) fn parse_json3(content: &str) -> Result<Vec<TranscriptSegment>> {
    let captions: Json3Captions = serde_json::from_str(content)?;

    let segments = captions
        .events
        .into_iter()
        .filter_map(|event| {
            let raw: String = event.segs.iter().map(|s| s.utf8.as_str()).collect();
            let text = raw.split_whitespace().collect::<Vec<_>>().join(" ");
            if text.is_empty() {
                return None;
            }
            let start = event.start_ms as f64 / 1000.0;
            let end = (event.start_ms + event.duration_ms) as f64 / 1000.0;
            Some(TranscriptSegment::new(start, end, text))
        })
        .collect();

    Ok(segments)
}

/// Extract metadata from a yt-dlp info JSON document.
pub(crate) fn parse_info_json(content: &str) -> Result<VideoMetadata> {
    let json: serde_json::Value = serde_json::from_str(content)?;

    let title = json["title"].as_str().unwrap_or("Unknown Title").to_string();

    let channel = json["channel"]
        .as_str()
        .or_else(|| json["uploader"].as_str())
        .map(|s| s.to_string());

    let duration_seconds = json["duration"].as_f64().map(|d| d as u32);

    // yt-dlp reports the upload date as YYYYMMDD
    let published_at = json["upload_date"].as_str().and_then(|date_str| {
        chrono::NaiveDate::parse_from_str(date_str, "%Y%m%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
    });

    Ok(VideoMetadata {
        title,
        channel,
        duration_seconds,
        published_at,
    })
}
