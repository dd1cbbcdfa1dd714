//! tubeqa - Chat with a YouTube video
//!
//! Fetches a video's transcript, builds an in-memory retrieval index over it
//! and answers questions about the video with Gemini.
//!
//! # Overview
//!
//! tubeqa allows you to:
//! - Load a transcript from a YouTube URL or video ID
//! - Ask questions in several answer styles (teacher, bullet points, ...)
//! - See the overall tone of the video
//! - Export the transcript as TXT, PDF, JSON, SRT or VTT
//!
//! # Architecture
//!
//! - `config` - Settings and prompt templates
//! - `youtube` - URL validation and transcript fetching
//! - `transcript` - Transcript model and export formats
//! - `chunking` - Character-sized transcript chunks
//! - `embedding` - Embedding generation
//! - `vector_store` - In-memory similarity index
//! - `rag` - The question answering chain
//! - `sentiment` - Polarity and subjectivity scoring
//! - `session` - One loaded video with its chat history
//!
//! # Example
//!
//! ```rust,no_run
//! use tubeqa::config::Settings;
//! use tubeqa::rag::AnswerStyle;
//! use tubeqa::session::{SessionComponents, VideoSession};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let components = SessionComponents::from_settings(&settings)?;
//!     let mut session = VideoSession::load("dQw4w9WgXcQ", &settings, components).await?;
//!
//!     let answer = session.ask("What is this video about?", AnswerStyle::Summary).await?;
//!     println!("{}", answer.text);
//!
//!     Ok(())
//! }
//! ```

pub mod chunking;
pub mod cli;
pub mod config;
pub mod embedding;
pub mod error;
pub mod gemini;
pub mod rag;
pub mod sentiment;
pub mod session;
pub mod transcript;
pub mod vector_store;
pub mod youtube;

pub use error::{Result, TubeqaError};
