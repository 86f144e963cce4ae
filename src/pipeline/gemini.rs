//! Gemini REST client: model listing and single-shot `generateContent` calls.

use crate::config::AppConfig;
use crate::error::ProviderError;
use crate::pipeline::traits::{GenerativeModel, ModelCatalog};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const MODEL_PREFIX: &str = "models/";

#[derive(Debug, Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiResponseContent,
}

#[derive(Debug, Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ModelListResponse {
    #[serde(default)]
    models: Vec<ModelInfo>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    pub name: String,
    #[serde(default)]
    pub supported_generation_methods: Vec<String>,
}

impl ModelInfo {
    pub fn id(&self) -> &str {
        self.name.strip_prefix(MODEL_PREFIX).unwrap_or(&self.name)
    }

    pub fn supports_generate_content(&self) -> bool {
        self.supported_generation_methods
            .iter()
            .any(|m| m == "generateContent")
    }
}

pub struct GeminiClient {
    generate_client: Client,
    list_client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl GeminiClient {
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        generate_timeout: Duration,
        list_timeout: Duration,
    ) -> reqwest::Result<Self> {
        Ok(Self {
            generate_client: Client::builder().timeout(generate_timeout).build()?,
            list_client: Client::builder().timeout(list_timeout).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    pub fn from_config(config: &AppConfig) -> reqwest::Result<Self> {
        Self::new(
            &config.api_base,
            config.api_key.clone(),
            config.llm_timeout,
            config.model_list_timeout,
        )
    }

    fn key(&self) -> Result<&str, ProviderError> {
        self.api_key
            .as_deref()
            .ok_or(ProviderError::MissingCredential)
    }

    pub async fn list_model_info(&self) -> Result<Vec<ModelInfo>, ProviderError> {
        let key = self.key()?;
        let response = self
            .list_client
            .get(format!("{}/models", self.base_url))
            .query(&[("key", key)])
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(status = %status, "model listing response");
        if !status.is_success() {
            return Err(ProviderError::from_status(status.as_u16(), body));
        }
        let parsed: ModelListResponse =
            serde_json::from_str(&body).map_err(|e| ProviderError::Malformed(e.to_string()))?;
        Ok(parsed.models)
    }

    fn first_text(response: GeminiResponse) -> Result<String, ProviderError> {
        response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .and_then(|p| p.text)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| ProviderError::Malformed("no candidate text".to_string()))
    }
}

#[async_trait]
impl ModelCatalog for GeminiClient {
    async fn list_models(&self) -> Result<Vec<String>, ProviderError> {
        Ok(self
            .list_model_info()
            .await?
            .iter()
            .map(|m| m.id().to_string())
            .collect())
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, ProviderError> {
        let key = self.key()?;
        let request_body = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text: prompt }],
            }],
        };
        let response = self
            .generate_client
            .post(format!("{}/models/{}:generateContent", self.base_url, model))
            .query(&[("key", key)])
            .json(&request_body)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(model, status = %status, "generateContent response");
        if status.as_u16() != 200 {
            return Err(ProviderError::from_status(status.as_u16(), body));
        }
        let parsed: GeminiResponse =
            serde_json::from_str(&body).map_err(|e| ProviderError::Malformed(e.to_string()))?;
        Self::first_text(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::serve;
    use axum::{
        extract::{Path, Query},
        http::StatusCode,
        response::IntoResponse,
        routing::{get, post},
        Json, Router,
    };
    use serde_json::{json, Value};
    use std::collections::HashMap;

    async fn list(Query(q): Query<HashMap<String, String>>) -> impl IntoResponse {
        if q.get("key").map(String::as_str) != Some("test-key") {
            return (StatusCode::BAD_REQUEST, Json(json!({"error": "API_KEY_INVALID"})));
        }
        (
            StatusCode::OK,
            Json(json!({
                "models": [
                    {"name": "models/gemini-2.0-flash", "supportedGenerationMethods": ["generateContent", "countTokens"]},
                    {"name": "models/text-embedding-004", "supportedGenerationMethods": ["embedContent"]}
                ]
            })),
        )
    }

    async fn generate(Path(target): Path<String>, Json(body): Json<Value>) -> impl IntoResponse {
        let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap_or("");
        match target.as_str() {
            "busy-model:generateContent" => (StatusCode::TOO_MANY_REQUESTS, Json(json!({}))),
            "empty-model:generateContent" => (StatusCode::OK, Json(json!({"candidates": []}))),
            "tool-model:generateContent" => (
                StatusCode::OK,
                Json(json!({"candidates": [{"content": {"parts": [{}]}}]})),
            ),
            _ => (
                StatusCode::OK,
                Json(json!({
                    "candidates": [{"content": {"parts": [{"text": format!("echo: {}", prompt)}]}}]
                })),
            ),
        }
    }

    async fn client(key: Option<&str>) -> GeminiClient {
        let app = Router::new()
            .route("/models", get(list))
            .route("/models/:target", post(generate));
        let base = serve(app).await;
        GeminiClient::new(
            &base,
            key.map(str::to_string),
            Duration::from_secs(5),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn lists_models_without_prefix() {
        let c = client(Some("test-key")).await;
        assert_eq!(
            c.list_models().await.unwrap(),
            vec!["gemini-2.0-flash".to_string(), "text-embedding-004".to_string()]
        );
        let info = c.list_model_info().await.unwrap();
        assert!(info[0].supports_generate_content());
        assert!(!info[1].supports_generate_content());
    }

    #[tokio::test]
    async fn bad_key_is_a_status_error() {
        let c = client(Some("wrong")).await;
        match c.list_models().await.unwrap_err() {
            ProviderError::Status { status, body } => {
                assert_eq!(status, 400);
                assert!(body.contains("API_KEY_INVALID"));
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[tokio::test]
    async fn generate_returns_first_part_text() {
        let c = client(Some("test-key")).await;
        assert_eq!(
            c.generate("gemini-2.0-flash", "hello").await.unwrap(),
            "echo: hello"
        );
    }

    #[tokio::test]
    async fn generate_maps_failures() {
        let c = client(Some("test-key")).await;
        assert!(matches!(
            c.generate("busy-model", "x").await,
            Err(ProviderError::RateLimited)
        ));
        assert!(matches!(
            c.generate("empty-model", "x").await,
            Err(ProviderError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn part_without_text_is_malformed() {
        let c = client(Some("test-key")).await;
        assert!(matches!(
            c.generate("tool-model", "x").await,
            Err(ProviderError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn fallback_skips_reply_without_text() {
        use crate::config::ModelPreferences;
        use crate::pipeline::mock::StaticCatalog;
        use crate::pipeline::{ModelSelector, VerificationOrchestrator};

        let models = vec!["tool-model".to_string(), "gemini-2.0-flash".to_string()];
        let prefs = ModelPreferences {
            preferred: models.clone(),
            fallback: Vec::new(),
            tier_marker: "flash".to_string(),
        };
        let orch = VerificationOrchestrator::new(
            ModelSelector::new(StaticCatalog::listing(models), prefs, Duration::ZERO),
            client(Some("test-key")).await,
        );
        let reply = orch
            .generate_with_fallback("STATUS: REAL, REASON: ok")
            .await;
        assert_eq!(reply, "echo: STATUS: REAL, REASON: ok");
    }

    #[tokio::test]
    async fn unreachable_host_error_hides_key() {
        let c = GeminiClient::new(
            "http://127.0.0.1:9/v1beta",
            Some("SECRETKEY123".to_string()),
            Duration::from_secs(2),
            Duration::from_secs(2),
        )
        .unwrap();
        let err = c.generate("gemini-1.5-flash", "x").await.unwrap_err();
        assert!(matches!(err, ProviderError::Transport(_)));
        assert!(!err.to_string().contains("SECRETKEY123"));
        let err = c.list_models().await.unwrap_err();
        assert!(!err.to_string().contains("SECRETKEY123"));
    }

    #[tokio::test]
    async fn missing_key_fails_before_any_request() {
        let c = client(None).await;
        assert!(matches!(
            c.list_models().await,
            Err(ProviderError::MissingCredential)
        ));
        assert!(matches!(
            c.generate("gemini-pro", "x").await,
            Err(ProviderError::MissingCredential)
        ));
    }
}
