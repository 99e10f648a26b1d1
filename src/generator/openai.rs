//! OpenAI chat-completions backend for the [`DslGenerator`] trait.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;

use super::error::GeneratorError;
use super::types::GenerationRequest;
use super::DslGenerator;

/// Configuration for the OpenAI backend.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    /// Prompt template; `{input_json}` is replaced with the serialized
    /// request.
    pub prompt_template: String,
    pub temperature: f64,
}

impl OpenAiConfig {
    pub fn new(api_key: impl Into<String>, prompt_template: impl Into<String>) -> Self {
        OpenAiConfig {
            api_key: api_key.into(),
            base_url: "https://api.openai.com/v1".into(),
            model: "gpt-4".into(),
            prompt_template: prompt_template.into(),
            // Deterministic drafting by default.
            temperature: 0.0,
        }
    }
}

/// Chat-completions client that drafts workflow steps from a request.
pub struct OpenAiGenerator {
    config: OpenAiConfig,
    client: reqwest::Client,
}

impl OpenAiGenerator {
    pub fn new(config: OpenAiConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn build_headers(&self) -> Result<HeaderMap, GeneratorError> {
        let mut headers = HeaderMap::new();
        let auth = format!("Bearer {}", self.config.api_key);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&auth).map_err(|e| GeneratorError::InvalidRequest(e.to_string()))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    fn build_payload(&self, request: &GenerationRequest) -> Result<Value, GeneratorError> {
        let input_json = serde_json::to_string_pretty(request)
            .map_err(|e| GeneratorError::SerializationError(e.to_string()))?;
        let prompt = self.config.prompt_template.replace("{input_json}", &input_json);
        Ok(serde_json::json!({
            "model": self.config.model,
            "temperature": self.config.temperature,
            "messages": [{ "role": "user", "content": prompt }],
        }))
    }

    fn parse_response(body: &Value) -> Result<String, GeneratorError> {
        body.get("choices")
            .and_then(|v| v.as_array())
            .and_then(|arr| arr.first())
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| {
                GeneratorError::SerializationError("completion carries no content".into())
            })
    }

    fn map_error(status: u16, body: &str) -> GeneratorError {
        if status == 401 || status == 403 {
            return GeneratorError::AuthenticationError(body.to_string());
        }
        if status == 429 {
            return GeneratorError::RateLimitExceeded { retry_after: None };
        }
        GeneratorError::ApiError {
            status,
            message: body.to_string(),
        }
    }
}

#[async_trait]
impl DslGenerator for OpenAiGenerator {
    fn id(&self) -> &str {
        "openai"
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, GeneratorError> {
        let headers = self.build_headers()?;
        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );
        let payload = self.build_payload(request)?;

        let response = self
            .client
            .post(url)
            .headers(headers)
            .json(&payload)
            .send()
            .await
            .map_err(|e| GeneratorError::NetworkError(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| GeneratorError::NetworkError(e.to_string()))?;

        if !status.is_success() {
            return Err(Self::map_error(status.as_u16(), &text));
        }

        let body: Value = serde_json::from_str(&text)
            .map_err(|e| GeneratorError::SerializationError(e.to_string()))?;
        Self::parse_response(&body)
    }
}
