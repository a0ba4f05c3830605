//! gistr CLI - summarise YouTube videos and web pages
//!
//! The application logic is contained in lib.rs, and this file is responsible
//! for parsing arguments and handling top-level errors.

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use gistr::{logging, ui, Config, LivePipeline, SummarizeError};

#[derive(Parser)]
#[command(name = "gistr")]
#[command(author, version, about = "Summarise YouTube videos and web pages with LLMs", long_about = None)]
struct Cli {
    /// Config file to use instead of the default locations
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarise a YouTube video or webpage by URL
    Summarise {
        /// URL to summarise
        url: String,
        /// API key for the configured provider (defaults to config/env)
        #[arg(long)]
        api_key: Option<String>,
        /// Show raw extracted text instead of summary
        #[arg(long)]
        raw: bool,
    },
    /// Print shell completions
    Completions {
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Summarise { url, api_key, raw }) => {
            let config = load_config(cli.config.as_ref())?;
            logging::init_stderr(&config.log);
            let pipeline = LivePipeline::from_config(&config)?;

            let result = if raw {
                print_raw(&pipeline, &url).await
            } else {
                let api_key = match api_key {
                    Some(key) => key,
                    None => resolve_api_key(&config)?,
                };
                summarise(&pipeline, &api_key, &url).await
            };

            if let Err(e) = result {
                report(&e);
                std::process::exit(1);
            }
        }
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
        }
        None => {
            // Default: Launch the TUI
            ui::run(load_config(cli.config.as_ref())?).await?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    config.context("failed to load configuration")
}

async fn summarise(
    pipeline: &LivePipeline,
    api_key: &str,
    url: &str,
) -> Result<(), SummarizeError> {
    println!(
        "Fetching content and summarizing with {}: {}",
        pipeline.model(),
        url
    );

    let summary = pipeline
        .run(api_key, url, |stage| tracing::debug!(%stage, "stage"))
        .await?;

    if summary.is_empty() {
        println!("{}", "The model returned an empty summary.".yellow());
        return Ok(());
    }

    println!("\n{}\n", "✅ Summary generated:".green().bold());
    println!("{}", summary.text.trim_end());
    println!(
        "\n{}",
        format!(
            "{} points · {} · {}",
            summary.bullet_points().len(),
            summary.model,
            summary.created_at.format("%Y-%m-%d %H:%M UTC")
        )
        .dimmed()
    );
    Ok(())
}

async fn print_raw(pipeline: &LivePipeline, url: &str) -> Result<(), SummarizeError> {
    println!("Fetching: {}", url);

    let document = pipeline.fetch_document(url).await?;
    let title = document.title.as_deref().unwrap_or("No title");

    println!("\n=== {} ===\n", title);
    println!("{}", document.text);
    println!("\n--- Extracted {} characters ---", document.text.len());
    Ok(())
}

/// Use the configured key, or ask for one when running interactively
fn resolve_api_key(config: &Config) -> anyhow::Result<String> {
    if let Ok(key) = config.api_key() {
        return Ok(key.to_string());
    }

    if !atty::is(atty::Stream::Stdin) {
        // Let validation report the missing key.
        return Ok(String::new());
    }

    let key = dialoguer::Password::new()
        .with_prompt(config.agent.provider.key_label())
        .allow_empty_password(true)
        .interact()?;
    Ok(key)
}

fn report(err: &SummarizeError) {
    eprintln!("{} {}", "❌".red(), err.headline().red().bold());
    if let Some(detail) = err.detail() {
        eprintln!("{}", detail);
    }
}
