//! Core data models for translation

use serde::{Deserialize, Serialize};

/// Author of a prompt message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// Instructions for the model
    System,
    /// Text to translate
    User,
}

/// One message of a chat-completion prompt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who wrote the message
    pub role: ChatRole,
    /// Message text
    pub content: String,
}

impl ChatMessage {
    /// System message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    /// User message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// OpenAI-compatible `/chat/completions` request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    /// Model id sent to the backend
    pub model: String,
    /// System prompt followed by the masked input
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature
    pub temperature: f32,
    /// Completion length limit
    pub max_tokens: u32,
}

/// Subset of the `/chat/completions` response the node reads
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    /// Completions, normally exactly one
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

/// One completion
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    /// Assistant message of this completion
    pub message: ChatReply,
}

/// Assistant message; `content` may be null
#[derive(Debug, Clone, Deserialize)]
pub struct ChatReply {
    /// Reply text
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// Content of the first choice, if the backend produced any
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
    }
}

/// Inputs of one node invocation, keyed as in the input schema.
///
/// Every field defaults to empty so an incomplete request still reaches the
/// node and comes back as an error string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslateInputs {
    /// Source language display name
    pub source_language: String,
    /// Target language display name
    pub target_language: String,
    /// Backend name
    pub llm: String,
    /// Text to translate
    pub input_text: String,
    /// `source=target` lines
    pub fixed_terms: String,
}

/// The node's single named output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslateOutput {
    /// Translation, or an error message
    pub translated_text: String,
}
