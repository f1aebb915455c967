use super::client::{StructuredCall, StylistClient, parse_json, response_text};
use super::request::single_image_parts;
use super::schema::classification_schema;
use super::types::ClassificationGuess;
use crate::core::wardrobe::{ClothingCategory, ClothingClassification, ClothingFit};
use crate::media::ImagePayload;
use crate::prompt::CLASSIFICATION_INSTRUCTION;
use serde::Deserialize;
use std::str::FromStr;

#[derive(Debug, Deserialize)]
struct RawClassification {
    category: String,
    name: String,
    #[serde(default)]
    color: Option<String>,
    #[serde(default)]
    fit: Option<String>,
    #[serde(default)]
    classification: Option<String>,
    #[serde(default)]
    style: Option<String>,
    #[serde(default)]
    material: Option<String>,
}

fn cleaned(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl RawClassification {
    fn into_guess(self) -> anyhow::Result<ClassificationGuess> {
        let category = ClothingCategory::from_str(self.category.trim())
            .map_err(|_| anyhow::anyhow!("unknown category {:?}", self.category))?;
        let fallback = ClassificationGuess::fallback();

        Ok(ClassificationGuess {
            category,
            name: cleaned(Some(self.name)).unwrap_or(fallback.name),
            color: cleaned(self.color),
            fit: self
                .fit
                .as_deref()
                .and_then(|fit| ClothingFit::from_str(fit.trim()).ok()),
            classification: self
                .classification
                .as_deref()
                .and_then(|c| ClothingClassification::from_str(c.trim()).ok())
                .unwrap_or(fallback.classification),
            style: cleaned(self.style),
            material: cleaned(self.material),
        })
    }
}

/// Best-effort metadata for uploads. Never fails.
pub struct ClothingClassifier {
    client: StylistClient,
}

impl ClothingClassifier {
    pub fn new(client: StylistClient) -> Self {
        Self { client }
    }

    pub async fn classify(&self, image: &ImagePayload) -> ClassificationGuess {
        match self.try_classify(image).await {
            Ok(guess) => {
                tracing::debug!(category = %guess.category, name = %guess.name, "item classified");
                guess
            }
            Err(e) => {
                tracing::warn!(error = %e, "classification failed; using fallback");
                ClassificationGuess::fallback()
            }
        }
    }

    async fn try_classify(&self, image: &ImagePayload) -> anyhow::Result<ClassificationGuess> {
        let response = self
            .client
            .invoke(StructuredCall {
                parts: single_image_parts(image, "Classify this clothing item."),
                system_instruction: Some(CLASSIFICATION_INSTRUCTION.to_string()),
                schema: classification_schema(),
                web_search: false,
            })
            .await?;
        let text = response_text(&response, self.client.provider_name())?;
        parse_json::<RawClassification>(&text)?.into_guess()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(category: &str, fit: Option<&str>) -> RawClassification {
        RawClassification {
            category: category.into(),
            name: "  Camel Trench ".into(),
            color: Some("Camel".into()),
            fit: fit.map(String::from),
            classification: Some("statement".into()),
            style: Some("".into()),
            material: None,
        }
    }

    #[test]
    fn raw_guess_is_normalised() {
        let guess = raw("outerwear", Some("Relaxed")).into_guess().unwrap();
        assert_eq!(guess.category, ClothingCategory::Outerwear);
        assert_eq!(guess.name, "Camel Trench");
        assert_eq!(guess.fit, Some(ClothingFit::Relaxed));
        assert_eq!(guess.classification, ClothingClassification::Statement);
        assert_eq!(guess.style, None);
    }

    #[test]
    fn unknown_fit_is_dropped_not_fatal() {
        let guess = raw("Tops", Some("Boxy")).into_guess().unwrap();
        assert_eq!(guess.fit, None);
    }

    #[test]
    fn unknown_category_is_an_error() {
        assert!(raw("Hats", None).into_guess().is_err());
    }
}
