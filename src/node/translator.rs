//! The translator node: term protection around one LLM call

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::core::client::{system_prompt, ChatBackend, OpenAiChatClient};
use crate::core::config::NodeConfig;
use crate::core::errors::{Result, TranslationError};
use crate::core::glossary::{self, Glossary};
use crate::core::models::{ChatCompletionRequest, ChatMessage, TranslateInputs, TranslateOutput};
use crate::node::schema::{InputSchema, NodeDescriptor};

/// Translator node with one pre-built client per configured backend
pub struct UniversalTranslator {
    config: NodeConfig,
    backends: HashMap<String, Arc<dyn ChatBackend>>,
}

impl std::fmt::Debug for UniversalTranslator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UniversalTranslator")
            .field("config", &self.config)
            .field("backends", &self.backends.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl UniversalTranslator {
    /// Load the configuration from its default location and build clients
    pub fn new() -> Result<Self> {
        let path = NodeConfig::resolve_path(None).map_err(|e| {
            error!("初始化失败: {}", e);
            e
        })?;
        Self::from_path(path)
    }

    /// Load the configuration from `path` and build clients
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = NodeConfig::load(path).map_err(|e| {
            error!("初始化失败: {}", e);
            e
        })?;
        Ok(Self::from_config(config))
    }

    /// Build one OpenAI-compatible client per backend.
    ///
    /// A backend whose client cannot be created is logged and left out; it
    /// only fails when selected.
    pub fn from_config(config: NodeConfig) -> Self {
        let mut backends: HashMap<String, Arc<dyn ChatBackend>> = HashMap::new();
        for (name, backend) in &config.llm {
            match OpenAiChatClient::from_backend(backend) {
                Ok(client) => {
                    backends.insert(name.clone(), Arc::new(client));
                }
                Err(e) => error!("初始化{}客户端失败: {}", name, e),
            }
        }
        info!("成功初始化AI客户端: {} of {} backends", backends.len(), config.llm.len());

        Self { config, backends }
    }

    /// Use caller-provided backends instead of HTTP clients
    pub fn with_backends(
        config: NodeConfig,
        backends: HashMap<String, Arc<dyn ChatBackend>>,
    ) -> Self {
        Self { config, backends }
    }

    /// Configuration the node was built from
    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    /// Input schema read from the default configuration location.
    ///
    /// Never fails: problems are reported through a single error field.
    pub fn input_types() -> InputSchema {
        match NodeConfig::resolve_path(None) {
            Ok(path) => Self::input_types_from(path),
            Err(e) => {
                error!("获取输入类型失败: {}", e);
                InputSchema::error(e.to_string())
            }
        }
    }

    /// Input schema read from the configuration at `path`
    pub fn input_types_from<P: AsRef<Path>>(path: P) -> InputSchema {
        match NodeConfig::from_file(path).and_then(|config| InputSchema::from_config(&config)) {
            Ok(schema) => schema,
            Err(e) => {
                error!("获取输入类型失败: {}", e);
                InputSchema::error(e.to_string())
            }
        }
    }

    /// Descriptor for the configuration at `path`
    pub fn describe<P: AsRef<Path>>(path: P) -> NodeDescriptor {
        NodeDescriptor::new(Self::input_types_from(path))
    }

    /// Parse `source=target` lines into a glossary
    pub fn parse_fixed_terms(&self, fixed_terms: &str) -> Glossary {
        Glossary::parse(fixed_terms)
    }

    /// Wrap glossary targets in protection markers
    pub fn apply_fixed_terms(&self, text: &str, fixed_terms: &Glossary) -> String {
        fixed_terms.protect(text)
    }

    /// Remove protection markers
    pub fn restore_fixed_terms(&self, text: &str) -> String {
        glossary::restore(text)
    }

    /// Send `text` to the named backend.
    ///
    /// Returns the translation, or `Translation Error: ...` on any failure.
    pub async fn translate_text(
        &self,
        text: &str,
        model_name: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> String {
        match self.call_backend(text, model_name, source_lang, target_lang).await {
            Ok(translation) => translation,
            Err(e) => {
                error!("翻译过程出错: {}", e);
                format!("Translation Error: {}", e)
            }
        }
    }

    async fn call_backend(
        &self,
        text: &str,
        model_name: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String> {
        let backend_config = self.config.backend(model_name)?;
        let client = self
            .backends
            .get(model_name)
            .ok_or_else(|| TranslationError::BackendUnavailable(model_name.to_string()))?;

        let request = ChatCompletionRequest {
            model: backend_config.model.clone(),
            messages: vec![
                ChatMessage::system(system_prompt(source_lang, target_lang)),
                ChatMessage::user(text),
            ],
            temperature: backend_config.temperature,
            max_tokens: backend_config.max_tokens,
        };

        client.complete(&request).await
    }

    /// Run one node invocation.
    ///
    /// Always yields a string: failures come back as `Error: ...` or, when
    /// the backend call fails, `Translation Error: ...`.
    pub async fn translate(&self, inputs: &TranslateInputs) -> TranslateOutput {
        let translated_text = match self.run(inputs).await {
            Ok(text) => text,
            Err(e) => {
                error!("翻译处理过程出错: {}", e);
                format!("Error: {}", e)
            }
        };
        TranslateOutput { translated_text }
    }

    async fn run(&self, inputs: &TranslateInputs) -> Result<String> {
        let fixed_terms = self.parse_fixed_terms(&inputs.fixed_terms);
        debug!("固定词对: {:?}", fixed_terms);

        let text_with_fixed = self.apply_fixed_terms(&inputs.input_text, &fixed_terms);
        debug!("应用固定词替换后的文本: {}", text_with_fixed);

        let source_lang = self.config.canonical_language(&inputs.source_language)?;
        let target_lang = self.config.canonical_language(&inputs.target_language)?;

        let translated_text = self
            .translate_text(&text_with_fixed, &inputs.llm, source_lang, target_lang)
            .await;
        debug!("翻译后的文本: {}", translated_text);

        let final_text = self.restore_fixed_terms(&translated_text);
        debug!("最终文本: {}", final_text);

        Ok(final_text)
    }
}
