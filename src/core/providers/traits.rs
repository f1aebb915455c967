use super::gemini_types::{GenerateContentRequest, GenerateContentResponse};
use async_trait::async_trait;

/// A hosted multimodal model that accepts Gemini-shaped requests.
///
/// The stylist only talks to this seam, so tests can swap in a scripted model.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Short name used in logs and error messages.
    fn name(&self) -> &str;

    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> anyhow::Result<GenerateContentResponse>;
}
