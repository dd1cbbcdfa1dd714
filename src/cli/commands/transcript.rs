//! Transcript command - fetch and export without indexing.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::transcript::{format_transcript, save_transcript, OutputFormat};
use crate::youtube::{parse_video_input, FetchedTranscript, TranscriptSource, YtDlpTranscriptSource};
use anyhow::{anyhow, Result};
use std::path::PathBuf;

/// Fetch a transcript for `input` behind a spinner.
pub(crate) async fn fetch(input: &str, settings: &Settings) -> Result<FetchedTranscript> {
    let video_id = parse_video_input(input)?;

    if let Err(e) = preflight::check(Operation::Fetch, settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'tubeqa doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let source = YtDlpTranscriptSource::new(&settings.youtube, settings.temp_dir());
    let spinner = Output::spinner(&format!("Fetching transcript for {}...", video_id));
    let result = source.fetch(&video_id).await;
    spinner.finish_and_clear();

    Ok(result?)
}

/// Run the transcript command.
pub async fn run_transcript(
    input: &str,
    output: Option<String>,
    format: &str,
    settings: Settings,
) -> Result<()> {
    let format: OutputFormat = format.parse().map_err(|e: String| anyhow!(e))?;
    if output.is_none() && !format.is_text() {
        return Err(anyhow!("{} output needs a file; pass --output", format));
    }

    let fetched = fetch(input, &settings).await?;
    let transcript = &fetched.transcript;

    match output {
        Some(path) => {
            let path = PathBuf::from(path);
            let title = if fetched.metadata.title.is_empty() {
                transcript.video_id.as_str()
            } else {
                fetched.metadata.title.as_str()
            };
            save_transcript(transcript, title, &path, format, &settings.export)?;
            Output::success(&format!(
                "Transcript saved as {} ({} segments)",
                path.display(),
                transcript.segments.len()
            ));
        }
        None => {
            if let Some(text) = format_transcript(transcript, format) {
                println!("{}", text);
            }
        }
    }

    Ok(())
}
