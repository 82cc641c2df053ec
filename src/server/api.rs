//! HTTP bridge exposing the node to a host application

use axum::{
    extract::{Json, State},
    routing::{get, post},
    Router,
};
use indexmap::IndexMap;
use serde::Serialize;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::core::models::{TranslateInputs, TranslateOutput};
use crate::node::schema::{node_class_mappings, NodeDescriptor, NODE_CLASS_NAME};
use crate::node::translator::UniversalTranslator;

/// Application state
pub struct AppState {
    translator: UniversalTranslator,
    config_path: PathBuf,
}

impl AppState {
    /// State serving `translator`, with schemas read from `config_path`
    pub fn new(translator: UniversalTranslator, config_path: PathBuf) -> Self {
        Self {
            translator,
            config_path,
        }
    }
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: String,
    service: String,
    version: String,
}

/// Health check handler
async fn health_check() -> axum::Json<HealthResponse> {
    axum::Json(HealthResponse {
        status: "ok".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Node descriptors keyed by class name; the schema is re-read on every call
async fn object_info(
    State(state): State<Arc<AppState>>,
) -> axum::Json<IndexMap<&'static str, NodeDescriptor>> {
    axum::Json(node_class_mappings(&state.config_path))
}

/// Run one node invocation
async fn invoke(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TranslateInputs>,
) -> axum::Json<TranslateOutput> {
    info!(
        "Invoking {} ({} -> {}, llm {})",
        NODE_CLASS_NAME, payload.source_language, payload.target_language, payload.llm
    );
    axum::Json(state.translator.translate(&payload).await)
}

/// Build the router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(health_check))
        .route("/object_info", get(object_info))
        .route("/invoke", post(invoke))
        .with_state(state)
}

/// Run the HTTP server
pub async fn run_server(host: String, port: u16, config_path: PathBuf) -> anyhow::Result<()> {
    let translator = UniversalTranslator::from_path(&config_path)?;
    let state = Arc::new(AppState::new(translator, config_path));
    let app = router(state);

    // Bind address
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::client::ChatBackend;
    use crate::core::config::tests::{write_config, SAMPLE_CONFIG};
    use crate::core::config::NodeConfig;
    use crate::core::errors::Result;
    use crate::core::models::ChatCompletionRequest;
    use async_trait::async_trait;
    use std::collections::HashMap;

    /// Translates the single word "hello" and leaves the rest alone
    struct HelloBackend;

    #[async_trait]
    impl ChatBackend for HelloBackend {
        async fn complete(&self, request: &ChatCompletionRequest) -> Result<String> {
            Ok(request
                .messages
                .last()
                .map(|m| m.content.replace("hello", "你好"))
                .unwrap_or_default())
        }
    }

    async fn spawn(config_path: PathBuf) -> String {
        let config = NodeConfig::load(&config_path).unwrap();
        let mut backends: HashMap<String, Arc<dyn ChatBackend>> = HashMap::new();
        backends.insert("deepseek".to_string(), Arc::new(HelloBackend));
        let translator = UniversalTranslator::with_backends(config, backends);
        let app = router(Arc::new(AppState::new(translator, config_path)));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_health_and_object_info() {
        let file = write_config(SAMPLE_CONFIG);
        let base = spawn(file.path().to_path_buf()).await;

        let health: serde_json::Value = reqwest::get(format!("{}/", base))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(health["status"], "ok");

        let info: serde_json::Value = reqwest::get(format!("{}/object_info", base))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        let node = &info["UniversalTranslator"];
        assert_eq!(node["display_name"], "通用翻译器");
        assert_eq!(node["input"]["required"]["llm"][1]["default"], "deepseek");
    }

    #[tokio::test]
    async fn test_invoke_returns_named_output() {
        let file = write_config(SAMPLE_CONFIG);
        let base = spawn(file.path().to_path_buf()).await;

        let output: TranslateOutput = reqwest::Client::new()
            .post(format!("{}/invoke", base))
            .json(&serde_json::json!({
                "source_language": "英语",
                "target_language": "中文",
                "llm": "deepseek",
                "input_text": "hello cat",
                "fixed_terms": "cat=Tama"
            }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(output.translated_text, "你好 Tama");
    }

    #[tokio::test]
    async fn test_invoke_unknown_language_is_error_string() {
        let file = write_config(SAMPLE_CONFIG);
        let base = spawn(file.path().to_path_buf()).await;

        let output: TranslateOutput = reqwest::Client::new()
            .post(format!("{}/invoke", base))
            .json(&TranslateInputs {
                source_language: "火星语".to_string(),
                target_language: "中文".to_string(),
                llm: "deepseek".to_string(),
                ..Default::default()
            })
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert!(output.translated_text.starts_with("Error:"));
    }

    #[tokio::test]
    async fn test_invoke_incomplete_body_is_error_string() {
        let file = write_config(SAMPLE_CONFIG);
        let base = spawn(file.path().to_path_buf()).await;

        let response = reqwest::Client::new()
            .post(format!("{}/invoke", base))
            .json(&serde_json::json!({"input_text": "hi"}))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let output: TranslateOutput = response.json().await.unwrap();
        assert!(output.translated_text.starts_with("Error:"));
    }
}
