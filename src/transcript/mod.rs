//! Transcript model and export.
//!
//! A transcript is the ordered list of caption segments for one video. It can
//! be written out as plain text, PDF, JSON, SRT or WebVTT.

mod format;
mod models;
mod pdf;

pub use format::{format_transcript, OutputFormat, SegmentExport, TranscriptExport};
pub use models::{format_timestamp, Transcript, TranscriptSegment};
pub use pdf::{layout_lines, lines_per_page, render_pdf, save_pdf_file};

use crate::config::ExportSettings;
use crate::error::Result;
use std::path::Path;

/// Save text as a UTF-8 file.
pub fn save_text_file(text: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, text)?;
    Ok(())
}

/// Write a transcript to `path` in the given format.
pub fn save_transcript(
    transcript: &Transcript,
    title: &str,
    path: &Path,
    format: OutputFormat,
    settings: &ExportSettings,
) -> Result<()> {
    match format_transcript(transcript, format) {
        Some(text) => save_text_file(&text, path),
        None => save_pdf_file(&transcript.full_text, title, path, settings),
    }
}
