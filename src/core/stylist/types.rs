use crate::core::wardrobe::{ClothingCategory, ClothingClassification, ClothingFit};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, VariantArray};

/// The three looks returned per request.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, VariantArray,
)]
#[strum(ascii_case_insensitive)]
pub enum OutfitType {
    Classic,
    Practical,
    Bold,
}

/// Web citation attached by the search tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingSource {
    pub title: String,
    pub uri: String,
}

/// One generated look. `items` holds wardrobe item ids, never indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutfitSuggestion {
    pub title: String,
    pub description: String,
    pub fashion_guideline: String,
    pub trend_factor: String,
    pub identity_match: String,
    #[serde(default)]
    pub proportion_note: String,
    #[serde(rename = "type")]
    pub outfit_type: OutfitType,
    pub items: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<GroundingSource>,
}

/// Best-effort metadata for a freshly uploaded photo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationGuess {
    pub category: ClothingCategory,
    pub name: String,
    pub color: Option<String>,
    pub fit: Option<ClothingFit>,
    pub classification: ClothingClassification,
    pub style: Option<String>,
    pub material: Option<String>,
}

impl ClassificationGuess {
    /// Substituted whenever classification fails.
    pub fn fallback() -> Self {
        Self {
            category: ClothingCategory::Tops,
            name: "New Item".to_string(),
            color: None,
            fit: None,
            classification: ClothingClassification::Basic,
            style: None,
            material: None,
        }
    }
}
