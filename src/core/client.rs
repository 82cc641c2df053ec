//! Chat-completion clients for the configured LLM backends

use async_trait::async_trait;
use reqwest::Url;
use tracing::{debug, warn};

use crate::core::config::BackendConfig;
use crate::core::errors::{Result, TranslationError};
use crate::core::glossary::{KEEP_CLOSE, KEEP_OPEN};
use crate::core::models::{ChatCompletionRequest, ChatCompletionResponse};

/// System instructions for translating from `source_lang` to `target_lang`
pub fn system_prompt(source_lang: &str, target_lang: &str) -> String {
    format!(
        r#"You are a professional translator.
Your task is to translate from {source_lang} to {target_lang} while maintaining the following principles:
1. Maintain the original meaning and tone
2. Use natural and fluent {target_lang}
3. DO NOT translate any text between {KEEP_OPEN} tags. Example: {KEEP_OPEN}word{KEEP_CLOSE} should remain exactly as is
4. Keep any technical terms accurate
5. Preserve the formatting and punctuation where appropriate
6. Do not add or remove information

Respond with ONLY the translation, no explanations or other text."#
    )
}

/// A chat-completion endpoint the node can send prompts to
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Send one request and return the reply text
    async fn complete(&self, request: &ChatCompletionRequest) -> Result<String>;
}

/// Client for an OpenAI-compatible `/chat/completions` endpoint
#[derive(Debug, Clone)]
pub struct OpenAiChatClient {
    client: reqwest::Client,
    api_key: String,
    endpoint: Url,
}

impl OpenAiChatClient {
    /// Create a client for `api_base` authenticating with `api_key`
    pub fn new(api_key: impl Into<String>, api_base: &str) -> Result<Self> {
        let base = Url::parse(api_base.trim_end_matches('/')).map_err(|e| {
            TranslationError::ConfigError {
                message: format!("invalid api_base '{}': {}", api_base, e),
            }
        })?;
        let endpoint = Url::parse(&format!("{}/chat/completions", base.as_str().trim_end_matches('/')))
            .map_err(|e| TranslationError::ConfigError {
                message: format!("invalid api_base '{}': {}", api_base, e),
            })?;

        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            endpoint,
        })
    }

    /// Create from a backend entry of the node configuration
    pub fn from_backend(config: &BackendConfig) -> Result<Self> {
        Self::new(config.api_key.clone(), &config.api_base)
    }

    /// Full URL requests are posted to
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ChatBackend for OpenAiChatClient {
    async fn complete(&self, request: &ChatCompletionRequest) -> Result<String> {
        debug!("POST {} (model {})", self.endpoint, request.model);

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| TranslationError::NetworkError {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!("Backend returned {}: {}", status, error_text);
            return Err(TranslationError::ApiError {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let body: ChatCompletionResponse =
            response
                .json()
                .await
                .map_err(|e| TranslationError::InvalidResponseError {
                    message: e.to_string(),
                })?;

        body.first_content()
            .map(|content| content.trim().to_string())
            .ok_or_else(|| TranslationError::InvalidResponseError {
                message: "No translation in response".to_string(),
            })
    }
}
