//! CLI module for tubeqa.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// tubeqa - Chat with a YouTube video
///
/// Fetches a video's transcript, indexes it in memory and answers questions
/// about it with Gemini.
#[derive(Parser, Debug)]
#[command(name = "tubeqa")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load a video and start an interactive chat session
    Chat {
        /// YouTube URL or video ID
        input: String,

        /// Gemini model to use
        #[arg(short, long)]
        model: Option<String>,

        /// Initial answer style (default, teacher, bullets, summary, examples)
        #[arg(short, long, default_value = "default")]
        style: String,
    },

    /// Ask a single question about a video
    Ask {
        /// YouTube URL or video ID
        input: String,

        /// The question to ask
        question: String,

        /// Gemini model to use
        #[arg(short, long)]
        model: Option<String>,

        /// Answer style (default, teacher, bullets, summary, examples)
        #[arg(short, long, default_value = "default")]
        style: String,

        /// Number of transcript chunks to retrieve
        #[arg(short = 'k', long)]
        top_k: Option<usize>,
    },

    /// Fetch a transcript and export it
    Transcript {
        /// YouTube URL or video ID
        input: String,

        /// Output file (stdout if not specified, text formats only)
        #[arg(short, long)]
        output: Option<String>,

        /// Output format (txt, pdf, json, srt, vtt)
        #[arg(long, default_value = "txt")]
        format: String,
    },

    /// Analyze the sentiment and tone of a video's transcript
    Sentiment {
        /// YouTube URL or video ID
        input: String,
    },

    /// Check system requirements and configuration
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "rag.model")
        key: String,
        /// Configuration value
        value: String,
    },

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}

/// Log filter for the tubeqa target. `-v` flags override the configured level.
pub fn log_filter(verbose: u8, configured: &str) -> String {
    let level = match verbose {
        0 => configured,
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    format!("tubeqa={}", level)
}
