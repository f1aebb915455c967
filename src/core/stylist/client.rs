use crate::core::providers::{
    Content, GeminiTool, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    GoogleSearch, Part, Provider,
};
use crate::error::LlmError;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_TIMEOUT_SECS: u64 = 90;

/// Knobs shared by every stylist call.
#[derive(Debug, Clone, PartialEq)]
pub struct StylistSettings {
    pub model: String,
    pub temperature: f64,
    pub max_output_tokens: u32,
    pub timeout_secs: u64,
    /// Attach the `googleSearch` grounding tool to outfit generation.
    pub web_search: bool,
    /// Drop worn or laundered items before the request instead of only annotating them.
    pub enforce_laundry: bool,
}

impl Default for StylistSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.7,
            max_output_tokens: 8192,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            web_search: true,
            enforce_laundry: false,
        }
    }
}

/// One structured model invocation.
pub struct StructuredCall {
    pub parts: Vec<Part>,
    pub system_instruction: Option<String>,
    pub schema: Value,
    pub web_search: bool,
}

/// Thin wrapper that shapes requests and enforces the timeout.
#[derive(Clone)]
pub struct StylistClient {
    provider: Arc<dyn Provider>,
    settings: StylistSettings,
}

impl StylistClient {
    pub fn new(provider: Arc<dyn Provider>, settings: StylistSettings) -> Self {
        Self { provider, settings }
    }

    pub fn settings(&self) -> &StylistSettings {
        &self.settings
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    fn build_request(&self, call: StructuredCall) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".into()),
                parts: call.parts,
            }],
            system_instruction: call.system_instruction.map(|text| Content {
                role: None,
                parts: vec![Part::text(text)],
            }),
            tools: call.web_search.then(|| {
                vec![GeminiTool {
                    google_search: GoogleSearch::default(),
                }]
            }),
            generation_config: GenerationConfig {
                temperature: self.settings.temperature,
                max_output_tokens: self.settings.max_output_tokens,
                response_mime_type: Some("application/json".into()),
                response_schema: Some(call.schema),
            },
        }
    }

    /// Send the call, bounded by `timeout_secs`.
    pub async fn invoke(&self, call: StructuredCall) -> anyhow::Result<GenerateContentResponse> {
        let request = self.build_request(call);
        let secs = self.settings.timeout_secs;

        match tokio::time::timeout(
            Duration::from_secs(secs),
            self.provider.generate_content(&self.settings.model, &request),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(LlmError::Timeout { secs }.into()),
        }
    }
}

/// Parse model JSON, tolerating prose or fences around the object.
pub fn parse_json<T: DeserializeOwned>(text: &str) -> anyhow::Result<T> {
    match serde_json::from_str::<T>(text.trim()) {
        Ok(value) => Ok(value),
        Err(first) => {
            let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) else {
                return Err(LlmError::Schema(first.to_string()).into());
            };
            if end <= start {
                return Err(LlmError::Schema(first.to_string()).into());
            }
            serde_json::from_str::<T>(&text[start..=end])
                .map_err(|e| LlmError::Schema(e.to_string()).into())
        }
    }
}

/// Response text, or an error when the model returned nothing usable.
pub fn response_text(response: &GenerateContentResponse, provider: &str) -> anyhow::Result<String> {
    response.text().ok_or_else(|| {
        LlmError::EmptyResponse {
            provider: provider.to_string(),
        }
        .into()
    })
}
