use super::client::{StructuredCall, StylistClient, parse_json, response_text};
use super::request::single_image_parts;
use super::schema::analysis_schema;
use crate::core::profile::BodyAnalysis;
use crate::error::StyleError;
use crate::media::ImagePayload;
use crate::prompt::ANALYSIS_INSTRUCTION;

/// Body-architecture analysis from one full-length photo. Failures are fatal.
pub struct BodyAnalyzer {
    client: StylistClient,
}

impl BodyAnalyzer {
    pub fn new(client: StylistClient) -> Self {
        Self { client }
    }

    pub async fn analyze(&self, photo: &ImagePayload) -> Result<BodyAnalysis, StyleError> {
        let result = async {
            let response = self
                .client
                .invoke(StructuredCall {
                    parts: single_image_parts(photo, "Analyse this full-length photo."),
                    system_instruction: Some(ANALYSIS_INSTRUCTION.to_string()),
                    schema: analysis_schema(),
                    web_search: false,
                })
                .await?;
            let text = response_text(&response, self.client.provider_name())?;
            let analysis: BodyAnalysis = parse_json(&text)?;
            anyhow::ensure!(
                !analysis.body_shape.trim().is_empty(),
                "analysis returned an empty body shape"
            );
            Ok::<_, anyhow::Error>(analysis)
        }
        .await;

        result.map_err(|e| {
            tracing::warn!(error = %e, "body analysis failed");
            StyleError::AnalysisFailed
        })
    }
}
