//! Pre-flight checks before expensive operations.
//!
//! Validates that required tools and configuration are available
//! before starting operations that would otherwise fail midway.

use crate::config::Settings;
use crate::error::{Result, TubeqaError};
use std::process::Command;

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Fetching a transcript requires yt-dlp.
    Fetch,
    /// Answering questions fetches, embeds and calls the model.
    Answer,
}

/// Run pre-flight checks for the given operation.
pub fn check(operation: Operation, settings: &Settings) -> Result<()> {
    match operation {
        Operation::Fetch => {
            check_tool("yt-dlp")?;
        }
        Operation::Answer => {
            settings.gemini.api_key()?;
            check_tool("yt-dlp")?;
        }
    }
    Ok(())
}

/// Check if an external tool is available.
fn check_tool(name: &str) -> Result<()> {
    match Command::new(name).arg("--version").output() {
        Ok(output) if output.status.success() => Ok(()),
        Ok(_) => Err(TubeqaError::ToolNotFound(format!(
            "{} is installed but not working correctly",
            name
        ))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(TubeqaError::ToolNotFound(name.to_string()))
        }
        Err(e) => Err(TubeqaError::ToolNotFound(format!("{}: {}", name, e))),
    }
}
