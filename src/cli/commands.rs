//! CLI command definitions and handlers

use clap::Subcommand;
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;
use tracing::info;

use crate::core::config::NodeConfig;
use crate::core::models::TranslateInputs;
use crate::node::schema::NodeDescriptor;
use crate::node::translator::UniversalTranslator;

/// Commands for the translator node
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one translation and print the result
    Translate {
        /// Source language display name, as listed in supported_languages
        #[arg(short, long)]
        source: String,

        /// Target language display name
        #[arg(short, long)]
        target: String,

        /// Backend name, as listed in llm
        #[arg(short, long)]
        llm: String,

        /// Text to translate (read from stdin if omitted)
        #[arg(long)]
        text: Option<String>,

        /// Fixed terms, one `source=target` per line
        #[arg(long, default_value = "")]
        terms: String,

        /// Read fixed terms from a file instead
        #[arg(long, conflicts_with = "terms")]
        terms_file: Option<PathBuf>,
    },

    /// Print the node descriptor (input schema and metadata) as JSON
    Schema,

    /// Start HTTP bridge for a host application
    Serve {
        /// Bind address (default: 127.0.0.1)
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Listen port (default: 8188)
        #[arg(short, long, default_value_t = 8188)]
        port: u16,
    },
}

/// Handle translate command
pub async fn handle_translate(
    config: Option<&Path>,
    source: String,
    target: String,
    llm: String,
    text: Option<String>,
    terms: String,
    terms_file: Option<PathBuf>,
) -> anyhow::Result<()> {
    let config_path = NodeConfig::resolve_path(config)?;
    let translator = UniversalTranslator::from_path(&config_path)?;

    let input_text = match text {
        Some(text) => text,
        None => {
            let mut buf = String::new();
            tokio::io::stdin().read_to_string(&mut buf).await?;
            buf
        }
    };
    let fixed_terms = match terms_file {
        Some(path) => tokio::fs::read_to_string(&path).await?,
        None => terms,
    };

    info!(
        "Translating {} chars with {} ({} -> {})",
        input_text.chars().count(),
        llm,
        source,
        target
    );

    let output = translator
        .translate(&TranslateInputs {
            source_language: source,
            target_language: target,
            llm,
            input_text,
            fixed_terms,
        })
        .await;

    println!("{}", output.translated_text);
    Ok(())
}

/// Handle schema command
pub fn handle_schema(config: Option<&Path>) -> anyhow::Result<()> {
    let descriptor = match config {
        Some(path) => UniversalTranslator::describe(path),
        None => NodeDescriptor::new(UniversalTranslator::input_types()),
    };
    println!("{}", serde_json::to_string_pretty(&descriptor)?);
    Ok(())
}

/// Handle serve command
pub async fn handle_serve(config: Option<&Path>, host: String, port: u16) -> anyhow::Result<()> {
    use crate::server::api::run_server;

    let config_path = NodeConfig::resolve_path(config)?;
    info!("Using configuration {}", config_path.display());
    println!("🚀 Server starting on http://{}:{}", host, port);

    run_server(host, port, config_path).await
}
