//! Universal Translator - LLM translation node for node-graph hosts
//!
//! This library loads a set of languages and OpenAI-compatible backends,
//! protects fixed glossary terms with `[KEEP]` markers, and sends one
//! chat-completion request per invocation.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod core;
pub mod node;
pub mod server;

// Re-export key types for convenience
pub use crate::core::{
    client::{ChatBackend, OpenAiChatClient},
    config::{BackendConfig, NodeConfig},
    errors::TranslationError,
    glossary::Glossary,
    models::{TranslateInputs, TranslateOutput},
};

pub use crate::node::{
    schema::{InputSchema, NodeDescriptor},
    translator::UniversalTranslator,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
