//! Ask command implementation.

use super::chat::load_session;
use crate::cli::Output;
use crate::config::Settings;
use crate::rag::AnswerStyle;
use anyhow::{anyhow, Result};

/// Run the ask command.
pub async fn run_ask(
    input: &str,
    question: &str,
    model: Option<String>,
    style_name: &str,
    top_k: Option<usize>,
    mut settings: Settings,
) -> Result<()> {
    let answer_style: AnswerStyle = style_name.parse().map_err(|e: String| anyhow!(e))?;
    if let Some(model) = model {
        settings.rag.model = model;
    }
    if let Some(k) = top_k {
        settings.rag.top_k = k.max(1);
    }

    let mut session = load_session(input, &settings).await?;

    let spinner = Output::spinner("Gemini is thinking...");
    let result = session.ask(question, answer_style).await;
    spinner.finish_and_clear();

    match result {
        Ok(answer) => {
            println!("\n{}\n", answer.text);

            if !answer.sources.is_empty() {
                Output::header("Sources");
                for (i, source) in answer.sources.iter().enumerate() {
                    Output::source(i + 1, source);
                }
            }
        }
        Err(e) => {
            Output::error(&format!("Error generating answer: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}
