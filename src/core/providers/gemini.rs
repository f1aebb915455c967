//! Google Gemini provider.
//!
//! Authentication is a plain API key, resolved from the explicit argument,
//! then `GEMINI_API_KEY`, then `GOOGLE_API_KEY`. The key travels in the
//! `x-goog-api-key` header so it never appears in request URLs or logs.

use super::gemini_types::{GenerateContentRequest, GenerateContentResponse};
use super::http_client::build_provider_client_with_timeout;
use super::scrub::{sanitize_api_error, scrub_secret_patterns};
use super::traits::Provider;
use crate::error::LlmError;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const PROVIDER_NAME: &str = "gemini";

pub struct GeminiProvider {
    api_key: Option<String>,
    base_url: String,
    client: Client,
}

impl GeminiProvider {
    pub fn new(api_key: Option<&str>, timeout_secs: u64) -> Self {
        let resolved_key = api_key
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(String::from)
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .or_else(|| std::env::var("GOOGLE_API_KEY").ok());

        Self {
            api_key: resolved_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            client: build_provider_client_with_timeout(timeout_secs),
        }
    }

    /// Point the provider at another host (proxies, test servers).
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn model_name(model: &str) -> String {
        if model.starts_with("models/") {
            model.to_string()
        } else {
            format!("models/{model}")
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/v1beta/{}:generateContent",
            self.base_url,
            Self::model_name(model)
        )
    }

    fn status_error(status: StatusCode, body: &str) -> LlmError {
        match status {
            StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimited {
                provider: PROVIDER_NAME.into(),
            },
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LlmError::Auth {
                provider: PROVIDER_NAME.into(),
            },
            _ => LlmError::Request {
                provider: PROVIDER_NAME.into(),
                message: format!("HTTP {status}: {}", sanitize_api_error(body)),
            },
        }
    }
}

#[async_trait]
impl Provider for GeminiProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> anyhow::Result<GenerateContentResponse> {
        let api_key = self.api_key.as_ref().ok_or_else(|| {
            anyhow::anyhow!(
                "Gemini API key not found. Options:\n\
                 1. Set GEMINI_API_KEY env var\n\
                 2. Add api_key to ~/.wardrobe-stylist/config.toml\n\
                 3. Get an API key from https://aistudio.google.com/app/apikey"
            )
        })?;

        tracing::debug!(
            model,
            parts = request.contents.iter().map(|c| c.parts.len()).sum::<usize>(),
            "gemini generateContent"
        );

        let response = self
            .client
            .post(self.endpoint(model))
            .header("x-goog-api-key", api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| LlmError::Request {
                provider: PROVIDER_NAME.into(),
                message: scrub_secret_patterns(&e.to_string()).into_owned(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::status_error(status, &body).into());
        }

        let result: GenerateContentResponse = response.json().await.map_err(|e| {
            LlmError::Schema(format!("unreadable Gemini response: {e}"))
        })?;

        if let Some(err) = result.error.as_ref() {
            return Err(LlmError::Request {
                provider: PROVIDER_NAME.into(),
                message: sanitize_api_error(&err.message),
            }
            .into());
        }

        if let Some(usage) = result.usage_metadata.as_ref() {
            tracing::debug!(
                input_tokens = usage.prompt_token_count,
                output_tokens = usage.candidates_token_count,
                "gemini usage"
            );
        }

        Ok(result)
    }
}
