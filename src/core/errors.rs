//! Custom error types for translation operations

use thiserror::Error;

/// Translation-related errors
#[derive(Error, Debug)]
pub enum TranslationError {
    /// API request failed
    #[error("API error: {status} - {message}")]
    ApiError {
        /// HTTP status returned by the backend
        status: u16,
        /// Response body, if any
        message: String,
    },

    /// Network error
    #[error("Network error: {message}")]
    NetworkError {
        /// Underlying transport error
        message: String,
    },

    /// Invalid response from API
    #[error("Invalid response: {message}")]
    InvalidResponseError {
        /// What was wrong with the response
        message: String,
    },

    /// File operation error
    #[error("File error: {path} - {message}")]
    FileError {
        /// Path that could not be read
        path: String,
        /// Underlying IO error
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the problem
        message: String,
    },

    /// Language display name not present in `supported_languages`
    #[error("Unknown language: {0}")]
    UnknownLanguage(String),

    /// Backend name not present in `llm`
    #[error("Unknown LLM backend: {0}")]
    UnknownBackend(String),

    /// Backend is configured but its client failed to initialize
    #[error("LLM backend not initialized: {0}")]
    BackendUnavailable(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Reqwest error
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),
}

/// Result type for translation operations
pub type Result<T> = std::result::Result<T, TranslationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TranslationError::ApiError {
            status: 401,
            message: "Unauthorized".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 401 - Unauthorized");

        let err = TranslationError::UnknownLanguage("克林贡语".to_string());
        assert!(err.to_string().contains("克林贡语"));

        let err = TranslationError::FileError {
            path: "/tmp/config.json".to_string(),
            message: "No such file or directory".to_string(),
        };
        assert!(err.to_string().starts_with("File error: /tmp/config.json"));
    }
}
