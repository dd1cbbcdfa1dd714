//! CLI output formatting utilities.

use crate::rag::SourceRef;
use crate::sentiment::{SentimentReport, Tone, SCALE_NOTE};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print video info.
    pub fn video_info(title: &str, id: &str, channel: Option<&str>, duration: f64) {
        let by = channel.map(|c| format!(" by {}", c)).unwrap_or_default();
        println!(
            "  {} {}{} ({}, {})",
            style("*").cyan(),
            style(title).bold(),
            by,
            style(id).dim(),
            format_duration(duration)
        );
    }

    /// Print the sentiment block.
    pub fn sentiment(report: &SentimentReport) {
        let tone = match report.tone {
            Tone::Positive => style(report.tone.to_string()).green().bold(),
            Tone::Negative => style(report.tone.to_string()).red().bold(),
            Tone::Neutral => style(report.tone.to_string()).yellow().bold(),
        };
        println!("  {}: {}", style("Overall tone").dim(), tone);
        Self::kv("Polarity score", &format!("{:.2}", report.polarity));
        Self::kv("Subjectivity score", &format!("{:.2}", report.subjectivity));
        println!("  {}", style(SCALE_NOTE).dim());
    }

    /// Print a retrieved source chunk.
    pub fn source(index: usize, source: &SourceRef) {
        println!(
            "  {} @ {} (score: {:.2})",
            style(format!("[{}]", index)).cyan(),
            style(&source.timestamp).cyan(),
            source.score
        );
        println!("      {}", content_preview(&source.content, 160));
        if let Some(url) = &source.url {
            println!("      {}", style(url).dim());
        }
    }

    /// Create a spinner.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}

/// Format duration in seconds to a human-readable string.
fn format_duration(seconds: f64) -> String {
    let total_seconds = seconds as u32;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, secs)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}

/// Truncate content with ellipsis, on a character boundary.
fn content_preview(content: &str, max_chars: usize) -> String {
    let content = content.replace('\n', " ");
    if content.chars().count() <= max_chars {
        content
    } else {
        let cut: String = content.chars().take(max_chars).collect();
        format!("{}...", cut)
    }
}
