//! Main entry point for the Universal Translator CLI

#![forbid(unsafe_code)]

use clap::Parser;
use dotenvy::dotenv;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use universal_translator::cli::commands::{self, Commands};

/// Universal Translator - LLM translation node with fixed-term protection
#[derive(Parser, Debug)]
#[command(name = "universal-translator", version, about, long_about = None)]
struct Args {
    /// Path to config.json (defaults to UNIVERSAL_TRANSLATOR_CONFIG, then the install directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let args = Args::parse();

    let log_level = if args.verbose {
        "debug".to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .ok()
                .filter(|_| !args.verbose)
                .unwrap_or_else(|| format!("universal_translator={}", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = args.config.as_deref();

    match args.command {
        Some(Commands::Translate {
            source,
            target,
            llm,
            text,
            terms,
            terms_file,
        }) => {
            commands::handle_translate(config, source, target, llm, text, terms, terms_file).await?;
        }
        Some(Commands::Schema) => {
            commands::handle_schema(config)?;
        }
        Some(Commands::Serve { host, port }) => {
            commands::handle_serve(config, host, port).await?;
        }
        None => {
            println!("Please specify a command. Use --help for more information.");
        }
    }

    Ok(())
}
