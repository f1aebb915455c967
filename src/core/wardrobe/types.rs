use crate::media::ImagePayload;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, VariantArray};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, VariantArray,
)]
#[strum(ascii_case_insensitive)]
pub enum ClothingCategory {
    Tops,
    Bottoms,
    Dresses,
    Outerwear,
    Shoes,
    Accessories,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, VariantArray,
)]
#[strum(ascii_case_insensitive)]
pub enum ClothingFit {
    Tailored,
    Oversized,
    Relaxed,
    Slim,
    Petite,
}

/// Whether a piece is a quiet basic or a focal statement piece.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, VariantArray,
)]
#[strum(ascii_case_insensitive)]
pub enum ClothingClassification {
    Basic,
    Statement,
}

/// One catalogued clothing photograph with its metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClothingItem {
    pub id: String,
    pub image: ImagePayload,
    pub category: ClothingCategory,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fit: Option<ClothingFit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<ClothingClassification>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_worn: Option<DateTime<Utc>>,
}

impl ClothingItem {
    pub fn new(image: ImagePayload, category: ClothingCategory, name: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            image,
            category,
            name: name.into(),
            color: None,
            fit: None,
            classification: None,
            style: None,
            material: None,
            last_worn: None,
        }
    }
}

/// A mood/reference photo; never treated as wearable inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspirationImage {
    pub id: String,
    pub image: ImagePayload,
}

impl InspirationImage {
    pub fn new(image: ImagePayload) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            image,
        }
    }
}
