//! Configuration management

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, error};

use crate::core::errors::{Result, TranslationError};

/// File name looked up next to the installed node
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Environment variable overriding the configuration location
pub const CONFIG_PATH_ENV: &str = "UNIVERSAL_TRANSLATOR_CONFIG";

/// Connection and sampling settings for one named LLM backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Bearer token
    pub api_key: String,
    /// Base URL; `/chat/completions` is appended
    pub api_base: String,
    /// Model id
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Completion length limit
    pub max_tokens: u32,
}

/// Node configuration, loaded once and never mutated afterwards.
///
/// Both maps keep document order: the first language and the first backend
/// become the UI defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Display name -> canonical language name used in prompts
    pub supported_languages: IndexMap<String, String>,
    /// Backend name -> backend settings
    pub llm: IndexMap<String, BackendConfig>,
}

impl NodeConfig {
    /// `config.json` in the directory holding the running executable
    pub fn default_path() -> Result<PathBuf> {
        let exe = std::env::current_exe()?;
        let dir = exe.parent().ok_or_else(|| TranslationError::ConfigError {
            message: format!("cannot determine install directory of {}", exe.display()),
        })?;
        Ok(dir.join(CONFIG_FILE_NAME))
    }

    /// Pick the configuration path: explicit argument, then the
    /// `UNIVERSAL_TRANSLATOR_CONFIG` variable, then [`Self::default_path`].
    pub fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = explicit {
            return Ok(path.to_path_buf());
        }
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Ok(PathBuf::from(path)),
            _ => Self::default_path(),
        }
    }

    /// Load from JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            error!("加载配置文件失败: {}: {}", path.display(), e);
            TranslationError::FileError {
                path: path.display().to_string(),
                message: e.to_string(),
            }
        })?;

        let config: Self = serde_json::from_str(&content).map_err(|e| {
            error!("加载配置文件失败: {}: {}", path.display(), e);
            TranslationError::ConfigError {
                message: format!("{}: {}", path.display(), e),
            }
        })?;

        debug!(
            "Loaded {} languages and {} backends from {}",
            config.supported_languages.len(),
            config.llm.len(),
            path.display()
        );
        Ok(config)
    }

    /// Load from file and validate
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Self::from_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.supported_languages.is_empty() {
            return Err(TranslationError::ConfigError {
                message: "supported_languages must not be empty".to_string(),
            });
        }

        if self.llm.is_empty() {
            return Err(TranslationError::ConfigError {
                message: "llm must configure at least one backend".to_string(),
            });
        }

        Ok(())
    }

    /// Language display names, in document order
    pub fn language_names(&self) -> Vec<String> {
        self.supported_languages.keys().cloned().collect()
    }

    /// Backend names, in document order
    pub fn backend_names(&self) -> Vec<String> {
        self.llm.keys().cloned().collect()
    }

    /// Resolve a display name to the canonical language name
    pub fn canonical_language(&self, display_name: &str) -> Result<&str> {
        self.supported_languages
            .get(display_name)
            .map(String::as_str)
            .ok_or_else(|| TranslationError::UnknownLanguage(display_name.to_string()))
    }

    /// Find backend settings by name
    pub fn backend(&self, name: &str) -> Result<&BackendConfig> {
        self.llm
            .get(name)
            .ok_or_else(|| TranslationError::UnknownBackend(name.to_string()))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Write;

    pub(crate) const SAMPLE_CONFIG: &str = r#"{
        "supported_languages": {
            "中文": "Chinese",
            "日语": "Japanese",
            "英语": "English"
        },
        "llm": {
            "deepseek": {
                "api_key": "sk-test",
                "api_base": "https://api.deepseek.com/v1",
                "model": "deepseek-chat",
                "temperature": 0.3,
                "max_tokens": 2048
            },
            "moonshot": {
                "api_key": "sk-moon",
                "api_base": "https://api.moonshot.cn/v1",
                "model": "moonshot-v1-8k",
                "temperature": 0.7,
                "max_tokens": 1024
            }
        }
    }"#;

    pub(crate) fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_preserves_document_order() {
        let file = write_config(SAMPLE_CONFIG);
        let config = NodeConfig::load(file.path()).unwrap();

        assert_eq!(config.language_names(), vec!["中文", "日语", "英语"]);
        assert_eq!(config.backend_names(), vec!["deepseek", "moonshot"]);

        let backend = config.backend("deepseek").unwrap();
        assert_eq!(backend.model, "deepseek-chat");
        assert_eq!(backend.max_tokens, 2048);
        assert!((backend.temperature - 0.3).abs() < f32::EPSILON);
    }

    #[test]
    fn test_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = NodeConfig::load(dir.path().join("config.json"));
        assert!(matches!(result, Err(TranslationError::FileError { .. })));
    }

    #[test]
    fn test_malformed_file_fails() {
        let file = write_config("{ \"supported_languages\": ");
        assert!(matches!(
            NodeConfig::load(file.path()),
            Err(TranslationError::ConfigError { .. })
        ));

        // backend without max_tokens
        let file = write_config(
            r#"{"supported_languages": {"中文": "Chinese"},
                "llm": {"x": {"api_key": "k", "api_base": "http://h", "model": "m", "temperature": 1.0}}}"#,
        );
        assert!(NodeConfig::load(file.path()).is_err());
    }

    #[test]
    fn test_validation_requires_languages_and_backends() {
        let file = write_config(r#"{"supported_languages": {}, "llm": {}}"#);
        assert!(NodeConfig::from_file(file.path()).is_ok());
        assert!(NodeConfig::load(file.path()).is_err());
    }

    #[test]
    fn test_canonical_language_lookup() {
        let config: NodeConfig = serde_json::from_str(SAMPLE_CONFIG).unwrap();
        assert_eq!(config.canonical_language("日语").unwrap(), "Japanese");
        assert!(matches!(
            config.canonical_language("Japanese"),
            Err(TranslationError::UnknownLanguage(_))
        ));
        assert!(matches!(
            config.backend("gpt"),
            Err(TranslationError::UnknownBackend(_))
        ));
    }

    #[test]
    fn test_resolve_path_prefers_explicit() {
        let explicit = Path::new("/opt/nodes/translator/config.json");
        assert_eq!(NodeConfig::resolve_path(Some(explicit)).unwrap(), explicit);
    }

    #[test]
    fn test_resolve_path_env_override_and_blank_fallback() {
        // only test touching the variable
        std::env::set_var(CONFIG_PATH_ENV, "/srv/translator/custom.json");
        assert_eq!(
            NodeConfig::resolve_path(None).unwrap(),
            PathBuf::from("/srv/translator/custom.json")
        );

        std::env::set_var(CONFIG_PATH_ENV, "   ");
        assert_eq!(
            NodeConfig::resolve_path(None).unwrap(),
            NodeConfig::default_path().unwrap()
        );

        std::env::remove_var(CONFIG_PATH_ENV);
        assert_eq!(
            NodeConfig::resolve_path(None).unwrap(),
            NodeConfig::default_path().unwrap()
        );
    }

    #[test]
    fn test_default_path_is_next_to_executable() {
        let path = NodeConfig::default_path().unwrap();
        assert_eq!(path.file_name().unwrap(), CONFIG_FILE_NAME);
    }
}
