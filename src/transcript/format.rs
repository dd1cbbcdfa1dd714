//! Transcript output formatting (TXT, JSON, SRT, VTT).
//!
//! PDF output lives in the sibling `pdf` module since it produces bytes,
//! not text.

use super::Transcript;
use serde::Serialize;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Txt,
    Pdf,
    Json,
    Srt,
    Vtt,
}

impl OutputFormat {
    /// File extension used for default file names.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Txt => "txt",
            OutputFormat::Pdf => "pdf",
            OutputFormat::Json => "json",
            OutputFormat::Srt => "srt",
            OutputFormat::Vtt => "vtt",
        }
    }

    /// Whether this format can be written to a terminal.
    pub fn is_text(&self) -> bool {
        !matches!(self, OutputFormat::Pdf)
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "txt" | "text" => Ok(OutputFormat::Txt),
            "pdf" => Ok(OutputFormat::Pdf),
            "json" => Ok(OutputFormat::Json),
            "srt" => Ok(OutputFormat::Srt),
            "vtt" | "webvtt" => Ok(OutputFormat::Vtt),
            _ => Err(format!("Unknown format: {}. Use txt, pdf, json, srt, or vtt.", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// JSON-serializable transcript for export.
#[derive(Debug, Serialize)]
pub struct TranscriptExport {
    pub video_id: String,
    pub duration_seconds: f64,
    pub segments: Vec<SegmentExport>,
}

#[derive(Debug, Serialize)]
pub struct SegmentExport {
    pub text: String,
    pub start_seconds: f64,
    pub end_seconds: f64,
}

impl From<&Transcript> for TranscriptExport {
    fn from(transcript: &Transcript) -> Self {
        Self {
            video_id: transcript.video_id.clone(),
            duration_seconds: transcript.duration_seconds,
            segments: transcript
                .segments
                .iter()
                .map(|s| SegmentExport {
                    text: s.text.clone(),
                    start_seconds: s.start_seconds,
                    end_seconds: s.end_seconds,
                })
                .collect(),
        }
    }
}

/// Format a transcript as text.
///
/// Returns `None` for binary formats.
pub fn format_transcript(transcript: &Transcript, format: OutputFormat) -> Option<String> {
    match format {
        OutputFormat::Txt => Some(transcript.full_text.clone()),
        OutputFormat::Json => Some(format_json(transcript)),
        OutputFormat::Srt => Some(format_srt(transcript)),
        OutputFormat::Vtt => Some(format_vtt(transcript)),
        OutputFormat::Pdf => None,
    }
}

fn format_json(transcript: &Transcript) -> String {
    let export = TranscriptExport::from(transcript);
    serde_json::to_string_pretty(&export).unwrap_or_else(|_| "{}".to_string())
}

/// Format as SRT (SubRip).
fn format_srt(transcript: &Transcript) -> String {
    let mut output = String::new();

    for (i, segment) in transcript.segments.iter().enumerate() {
        output.push_str(&format!("{}\n", i + 1));
        output.push_str(&format!(
            "{} --> {}\n",
            format_cue_timestamp(segment.start_seconds, ','),
            format_cue_timestamp(segment.end_seconds, ',')
        ));
        output.push_str(&segment.text);
        output.push_str("\n\n");
    }

    output
}

/// Format as WebVTT.
fn format_vtt(transcript: &Transcript) -> String {
    let mut output = String::from("WEBVTT\n\n");

    for (i, segment) in transcript.segments.iter().enumerate() {
        output.push_str(&format!("{}\n", i + 1));
        output.push_str(&format!(
            "{} --> {}\n",
            format_cue_timestamp(segment.start_seconds, '.'),
            format_cue_timestamp(segment.end_seconds, '.')
        ));
        output.push_str(&segment.text);
        output.push_str("\n\n");
    }

    output
}

/// Cue timestamp `HH:MM:SS<sep>mmm`; SRT uses a comma, VTT a dot.
fn format_cue_timestamp(seconds: f64, millis_sep: char) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0).round() as u64;
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms % 3_600_000) / 60_000;
    let secs = (total_ms % 60_000) / 1000;
    let ms = total_ms % 1000;

    format!("{:02}:{:02}:{:02}{}{:03}", hours, minutes, secs, millis_sep, ms)
}
