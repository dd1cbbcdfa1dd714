//! Sentiment command.

use super::transcript::fetch;
use crate::cli::Output;
use crate::config::Settings;
use crate::sentiment::analyze_with_threshold;
use anyhow::Result;

/// Fetch a transcript and print its tone.
pub async fn run_sentiment(input: &str, settings: Settings) -> Result<()> {
    let fetched = fetch(input, &settings).await?;

    let title = if fetched.metadata.title.is_empty() {
        fetched.transcript.video_id.clone()
    } else {
        fetched.metadata.title.clone()
    };

    let report = analyze_with_threshold(&fetched.transcript.full_text, settings.sentiment.tone_threshold);

    Output::header(&format!("Sentiment & Tone Analysis: {}", title));
    Output::sentiment(&report);
    Ok(())
}
