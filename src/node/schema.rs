//! Declarative input schema and node metadata for the host UI

use indexmap::IndexMap;
use serde::Serialize;
use std::path::Path;

use crate::core::config::NodeConfig;
use crate::core::errors::{Result, TranslationError};
use crate::node::translator::UniversalTranslator;

/// Registered class name of the node
pub const NODE_CLASS_NAME: &str = "UniversalTranslator";
/// Name shown in the host's node menu
pub const NODE_DISPLAY_NAME: &str = "通用翻译器";
/// Output value types
pub const RETURN_TYPES: [&str; 1] = ["STRING"];
/// Output names
pub const RETURN_NAMES: [&str; 1] = ["translated_text"];
/// Entry point the host calls
pub const FUNCTION: &str = "translate";
/// Menu category
pub const CATEGORY: &str = "zwen";

/// Scalar value type of a free-form input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ValueType {
    /// Text value
    #[serde(rename = "STRING")]
    String,
}

/// Options of a dropdown input
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoiceOptions {
    /// Preselected value
    pub default: String,
    /// Label shown in the UI
    pub display: String,
}

/// Options of a free-form input
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TextOptions {
    /// Render as a multi-line text box
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub multiline: bool,
    /// Initial value
    pub default: String,
    /// Hint shown while empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Label shown in the UI
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

/// One input, serialized as the host's `[type, options]` pair
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum InputSpec {
    /// Dropdown over a fixed list of values
    Choice(Vec<String>, ChoiceOptions),
    /// Typed free-form value
    Value(ValueType, TextOptions),
}

impl InputSpec {
    fn choice(options: Vec<String>, default: String, display: &str) -> Self {
        InputSpec::Choice(
            options,
            ChoiceOptions {
                default,
                display: display.to_string(),
            },
        )
    }

    fn multiline_text(placeholder: &str, display: &str) -> Self {
        InputSpec::Value(
            ValueType::String,
            TextOptions {
                multiline: true,
                default: String::new(),
                placeholder: Some(placeholder.to_string()),
                display: Some(display.to_string()),
            },
        )
    }
}

/// The node's inputs, in display order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputSchema {
    /// Input name -> spec
    pub required: IndexMap<String, InputSpec>,
}

impl InputSchema {
    /// Build the schema from a loaded configuration
    pub fn from_config(config: &NodeConfig) -> Result<Self> {
        let languages = config.language_names();
        let backends = config.backend_names();

        let first_language = languages
            .first()
            .cloned()
            .ok_or_else(|| TranslationError::ConfigError {
                message: "supported_languages must not be empty".to_string(),
            })?;
        let second_language = languages.get(1).cloned().unwrap_or_else(|| first_language.clone());
        let first_backend = backends
            .first()
            .cloned()
            .ok_or_else(|| TranslationError::ConfigError {
                message: "llm must configure at least one backend".to_string(),
            })?;

        let mut required = IndexMap::new();
        required.insert(
            "source_language".to_string(),
            InputSpec::choice(languages.clone(), first_language, "源语言"),
        );
        required.insert(
            "target_language".to_string(),
            InputSpec::choice(languages, second_language, "目标语言"),
        );
        required.insert(
            "llm".to_string(),
            InputSpec::choice(backends, first_backend, "LLM"),
        );
        required.insert(
            "input_text".to_string(),
            InputSpec::multiline_text("请输入要翻译的文本", "输入文本"),
        );
        required.insert(
            "fixed_terms".to_string(),
            InputSpec::multiline_text("输入格式：原文=译文（每行一个）", "固定词组"),
        );

        Ok(Self { required })
    }

    /// Single-field schema that shows `message` in place of the real inputs
    pub fn error(message: impl Into<String>) -> Self {
        let mut required = IndexMap::new();
        required.insert(
            "error".to_string(),
            InputSpec::Value(
                ValueType::String,
                TextOptions {
                    default: message.into(),
                    ..Default::default()
                },
            ),
        );
        Self { required }
    }

    /// True when this is the degraded schema produced by [`Self::error`]
    pub fn is_error(&self) -> bool {
        self.required.len() == 1 && self.required.contains_key("error")
    }
}

/// Everything the host needs to register and draw the node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeDescriptor {
    /// Registered class name
    pub name: &'static str,
    /// Menu label
    pub display_name: &'static str,
    /// Menu category
    pub category: &'static str,
    /// Entry point name
    pub function: &'static str,
    /// Input schema
    pub input: InputSchema,
    /// Output value types
    pub output: Vec<&'static str>,
    /// Output names
    pub output_name: Vec<&'static str>,
}

impl NodeDescriptor {
    /// Descriptor of the translator node with the given inputs
    pub fn new(input: InputSchema) -> Self {
        Self {
            name: NODE_CLASS_NAME,
            display_name: NODE_DISPLAY_NAME,
            category: CATEGORY,
            function: FUNCTION,
            input,
            output: RETURN_TYPES.to_vec(),
            output_name: RETURN_NAMES.to_vec(),
        }
    }
}

/// Class name -> descriptor of every node this crate registers.
///
/// Input schemas are read from the configuration at `config_path`.
pub fn node_class_mappings<P: AsRef<Path>>(
    config_path: P,
) -> IndexMap<&'static str, NodeDescriptor> {
    IndexMap::from([(NODE_CLASS_NAME, UniversalTranslator::describe(config_path))])
}

/// Class name -> display name of every node this crate registers
pub fn node_display_name_mappings() -> IndexMap<&'static str, &'static str> {
    IndexMap::from([(NODE_CLASS_NAME, NODE_DISPLAY_NAME)])
}
