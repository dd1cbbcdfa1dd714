//! Interactive chat command.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::rag::AnswerStyle;
use crate::session::{Role, SessionComponents, VideoSession};
use crate::transcript::OutputFormat;
use anyhow::{anyhow, Result};
use console::style;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

const HELP: &str = "\
Commands:
  /style <name>                      switch answer style
  /styles                            list answer styles
  /save txt|pdf|json|srt|vtt [path]  save the transcript (default: transcript.<ext>)
  /history                           show the conversation
  /sentiment                         show the sentiment analysis
  /clear                             clear the conversation
  /help                              show this help
  exit, quit                         leave the session
Anything else is asked as a question.";

/// A parsed line of REPL input.
#[derive(Debug, PartialEq)]
enum ReplInput {
    Empty,
    Exit,
    Help,
    Styles,
    Style(String),
    Save(String, Option<String>),
    History,
    Sentiment,
    Clear,
    Unknown(String),
    Question(String),
}

fn parse_repl_input(line: &str) -> ReplInput {
    let line = line.trim();
    if line.is_empty() {
        return ReplInput::Empty;
    }
    if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
        return ReplInput::Exit;
    }
    let Some(command) = line.strip_prefix('/') else {
        return ReplInput::Question(line.to_string());
    };

    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default().to_lowercase();
    let args: Vec<&str> = parts.collect();

    match name.as_str() {
        "help" => ReplInput::Help,
        "styles" => ReplInput::Styles,
        "style" => ReplInput::Style(args.join(" ")),
        "save" => {
            // The path is everything after the format, spaces included.
            let rest = command
                .trim_start()
                .split_once(char::is_whitespace)
                .map(|(_, rest)| rest.trim())
                .unwrap_or_default();
            match rest.split_once(char::is_whitespace) {
                Some((format, path)) => {
                    ReplInput::Save(format.to_string(), Some(path.trim().to_string()))
                }
                None if rest.is_empty() => ReplInput::Save("txt".to_string(), None),
                None => ReplInput::Save(rest.to_string(), None),
            }
        }
        "history" => ReplInput::History,
        "sentiment" => ReplInput::Sentiment,
        "clear" => ReplInput::Clear,
        _ => ReplInput::Unknown(name),
    }
}

/// Check requirements, then load the video behind a spinner.
pub(crate) async fn load_session(input: &str, settings: &Settings) -> Result<VideoSession> {
    if let Err(e) = preflight::check(Operation::Answer, settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'tubeqa doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let components = SessionComponents::from_settings(settings)?;
    let spinner = Output::spinner("Fetching transcript and building index...");
    let result = VideoSession::load(input, settings, components).await;
    spinner.finish_and_clear();

    let session = result?;
    Output::success(&format!(
        "Transcript loaded: {} segments, {} chunks indexed.",
        session.transcript().segments.len(),
        session.chunk_count()
    ));
    Ok(session)
}

/// Run the interactive chat command.
pub async fn run_chat(input: &str, model: Option<String>, style_name: &str, mut settings: Settings) -> Result<()> {
    let mut answer_style: AnswerStyle = style_name.parse().map_err(|e: String| anyhow!(e))?;
    if let Some(model) = model {
        settings.rag.model = model;
    }

    let mut session = load_session(input, &settings).await?;

    Output::header("Video");
    Output::video_info(
        &session.metadata().title,
        session.video_id().as_str(),
        session.metadata().channel.as_deref(),
        session.transcript().duration_seconds,
    );

    Output::header("Sentiment & Tone Analysis");
    Output::sentiment(session.sentiment());

    println!("\n{}", style(format!("Chat ({})", session.model_name())).bold().cyan());
    println!(
        "{}\n",
        style("Ask a question, '/help' for commands, or 'exit' to quit.").dim()
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{} ", style("You:").green().bold());
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match parse_repl_input(&line) {
            ReplInput::Empty => continue,
            ReplInput::Exit => {
                Output::info("Goodbye!");
                break;
            }
            ReplInput::Help => println!("{}", HELP),
            ReplInput::Styles => {
                for s in AnswerStyle::ALL {
                    let marker = if s == answer_style { "*" } else { " " };
                    println!("  {} {:<9} {}", marker, s.to_string(), style(s.label()).dim());
                }
            }
            ReplInput::Style(name) => match name.parse::<AnswerStyle>() {
                Ok(s) => {
                    answer_style = s;
                    Output::info(&format!("Answer style: {}", s.label()));
                }
                Err(e) => Output::error(&e),
            },
            ReplInput::Save(format, path) => save(&session, &format, path),
            ReplInput::History => {
                if session.history().is_empty() {
                    Output::info("No messages yet.");
                }
                for turn in session.history() {
                    let who = match turn.role {
                        Role::User => style("You:").green().bold(),
                        Role::Assistant => style("Gemini:").cyan().bold(),
                    };
                    println!("{} {}", who, turn.content);
                }
            }
            ReplInput::Sentiment => Output::sentiment(session.sentiment()),
            ReplInput::Clear => {
                session.clear_history();
                Output::info("Conversation history cleared.");
            }
            ReplInput::Unknown(name) => {
                Output::warning(&format!("Unknown command '/{}'. Type /help for commands.", name));
            }
            ReplInput::Question(question) => {
                let spinner = Output::spinner("Gemini is thinking...");
                let result = session.ask(&question, answer_style).await;
                spinner.finish_and_clear();

                match result {
                    Ok(answer) => println!("\n{} {}\n", style("Gemini:").cyan().bold(), answer.text),
                    Err(e) => Output::error(&format!("Error generating answer: {}", e)),
                }
            }
        }
    }

    Ok(())
}

fn save(session: &VideoSession, format: &str, path: Option<String>) {
    let format: OutputFormat = match format.parse() {
        Ok(f) => f,
        Err(e) => {
            Output::error(&e);
            return;
        }
    };
    let path = path
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(format!("transcript.{}", format.extension())));

    match session.save_transcript(&path, format) {
        Ok(()) => Output::success(&format!("Transcript saved as {}", path.display())),
        Err(e) => Output::error(&format!("Failed to save transcript: {}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_repl_input() {
        assert_eq!(parse_repl_input("   "), ReplInput::Empty);
        assert_eq!(parse_repl_input("QUIT"), ReplInput::Exit);
        assert_eq!(
            parse_repl_input("What is a trait?"),
            ReplInput::Question("What is a trait?".to_string())
        );
        assert_eq!(parse_repl_input("/style bullets"), ReplInput::Style("bullets".to_string()));
        assert_eq!(parse_repl_input("/save"), ReplInput::Save("txt".to_string(), None));
        assert_eq!(
            parse_repl_input("/save pdf notes.pdf"),
            ReplInput::Save("pdf".to_string(), Some("notes.pdf".to_string()))
        );
        assert_eq!(parse_repl_input("/save srt"), ReplInput::Save("srt".to_string(), None));
        assert_eq!(parse_repl_input("/Clear"), ReplInput::Clear);
        assert_eq!(parse_repl_input("/nope"), ReplInput::Unknown("nope".to_string()));
    }

    #[test]
    fn test_save_path_keeps_spaces() {
        assert_eq!(
            parse_repl_input("/save pdf my notes.pdf"),
            ReplInput::Save("pdf".to_string(), Some("my notes.pdf".to_string()))
        );
        assert_eq!(
            parse_repl_input("/save txt  ~/Talk Notes/rust  intro.txt "),
            ReplInput::Save("txt".to_string(), Some("~/Talk Notes/rust  intro.txt".to_string()))
        );
    }
}
