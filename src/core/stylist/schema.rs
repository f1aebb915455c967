//! Structured-output schemas in Gemini's OpenAPI subset.

use crate::core::stylist::types::OutfitType;
use crate::core::wardrobe::{ClothingCategory, ClothingClassification, ClothingFit};
use serde_json::{Value, json};
use strum::VariantArray;

pub const OUTFITS_PER_REQUEST: usize = 3;

fn variant_names<T: VariantArray + ToString>() -> Vec<String> {
    T::VARIANTS.iter().map(ToString::to_string).collect()
}

fn string() -> Value {
    json!({ "type": "STRING" })
}

pub fn outfits_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "outfits": {
                "type": "ARRAY",
                "minItems": OUTFITS_PER_REQUEST,
                "maxItems": OUTFITS_PER_REQUEST,
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": string(),
                        "description": string(),
                        "fashionGuideline": string(),
                        "trendFactor": string(),
                        "identityMatch": string(),
                        "proportionNote": string(),
                        "type": {
                            "type": "STRING",
                            "enum": variant_names::<OutfitType>(),
                        },
                        "items": {
                            "type": "ARRAY",
                            "items": string(),
                        },
                    },
                    "required": [
                        "title",
                        "description",
                        "fashionGuideline",
                        "trendFactor",
                        "identityMatch",
                        "proportionNote",
                        "type",
                        "items",
                    ],
                },
            },
        },
        "required": ["outfits"],
    })
}

pub fn classification_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "category": {
                "type": "STRING",
                "enum": variant_names::<ClothingCategory>(),
            },
            "name": string(),
            "color": string(),
            "fit": {
                "type": "STRING",
                "enum": variant_names::<ClothingFit>(),
            },
            "classification": {
                "type": "STRING",
                "enum": variant_names::<ClothingClassification>(),
            },
            "style": string(),
            "material": string(),
        },
        "required": ["category", "name", "color", "classification"],
    })
}

pub fn analysis_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "bodyShape": string(),
            "proportions": string(),
            "suggestedFocus": string(),
            "heightEstimate": string(),
        },
        "required": ["bodyShape", "proportions", "suggestedFocus", "heightEstimate"],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outfits_schema_pins_three_looks() {
        let schema = outfits_schema();
        let outfits = &schema["properties"]["outfits"];
        assert_eq!(outfits["minItems"], 3);
        assert_eq!(outfits["maxItems"], 3);
        assert_eq!(
            outfits["items"]["properties"]["type"]["enum"],
            json!(["Classic", "Practical", "Bold"])
        );
        let required = outfits["items"]["required"].as_array().unwrap();
        assert!(required.contains(&json!("proportionNote")));
        assert!(required.contains(&json!("items")));
    }

    #[test]
    fn classification_schema_lists_categories() {
        let schema = classification_schema();
        let categories = schema["properties"]["category"]["enum"].as_array().unwrap();
        assert_eq!(categories.len(), 6);
        assert!(categories.contains(&json!("Outerwear")));
        assert_eq!(
            schema["properties"]["classification"]["enum"],
            json!(["Basic", "Statement"])
        );
    }

    #[test]
    fn analysis_schema_requires_all_fields() {
        let schema = analysis_schema();
        assert_eq!(schema["required"].as_array().unwrap().len(), 4);
    }
}
