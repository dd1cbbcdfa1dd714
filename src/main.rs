//! tubeqa CLI entry point.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use tubeqa::cli::{commands, log_filter, Cli, Commands};
use tubeqa::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    // GEMINI_API_KEY usually lives in a local .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config_path = cli
        .config
        .as_deref()
        .map(PathBuf::from)
        .unwrap_or_else(Settings::default_config_path);
    let settings = Settings::load_from(Some(&config_path))?;

    tracing_subscriber::registry()
        .with(EnvFilter::new(std::env::var("RUST_LOG").unwrap_or_else(|_| {
            log_filter(cli.verbose, &settings.general.log_level)
        })))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match &cli.command {
        Commands::Chat { input, model, style } => {
            std::fs::create_dir_all(settings.temp_dir())?;
            commands::run_chat(input, model.clone(), style, settings).await?;
        }

        Commands::Ask {
            input,
            question,
            model,
            style,
            top_k,
        } => {
            std::fs::create_dir_all(settings.temp_dir())?;
            commands::run_ask(input, question, model.clone(), style, *top_k, settings).await?;
        }

        Commands::Transcript { input, output, format } => {
            std::fs::create_dir_all(settings.temp_dir())?;
            commands::run_transcript(input, output.clone(), format, settings).await?;
        }

        Commands::Sentiment { input } => {
            std::fs::create_dir_all(settings.temp_dir())?;
            commands::run_sentiment(input, settings).await?;
        }

        Commands::Doctor => {
            commands::run_doctor(&settings, &config_path)?;
        }

        Commands::Config { action } => {
            commands::run_config(action, settings, &config_path)?;
        }
    }

    Ok(())
}
