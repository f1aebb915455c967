#![allow(dead_code)]

use std::sync::Arc;

use serde_json::{Value, json};
use wiremock::MockServer;

use wardrobe_stylist::core::providers::GeminiProvider;
use wardrobe_stylist::core::stylist::{StylistClient, StylistSettings};
use wardrobe_stylist::core::wardrobe::{ClothingCategory, ClothingItem};
use wardrobe_stylist::media::ImagePayload;

pub const TEST_API_KEY: &str = "test-gemini-key";
pub const GENERATE_PATH: &str = "/v1beta/models/gemini-3-flash-preview:generateContent";

/// 1x1 transparent PNG.
pub const PIXEL_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

pub fn photo() -> ImagePayload {
    ImagePayload::from_bytes(PIXEL_PNG, "image/png")
}

pub fn item(name: &str, category: ClothingCategory) -> ClothingItem {
    ClothingItem::new(photo(), category, name)
}

pub fn settings() -> StylistSettings {
    StylistSettings {
        timeout_secs: 5,
        ..StylistSettings::default()
    }
}

pub fn client(server: &MockServer, settings: StylistSettings) -> StylistClient {
    let provider = GeminiProvider::new(Some(TEST_API_KEY), settings.timeout_secs)
        .with_base_url(&server.uri());
    StylistClient::new(Arc::new(provider), settings)
}

/// A `generateContent` body whose only text part is `payload` serialized.
pub fn gemini_reply(payload: &Value) -> Value {
    json!({
        "candidates": [{
            "content": { "parts": [{ "text": payload.to_string() }] },
            "finishReason": "STOP"
        }],
        "usageMetadata": { "promptTokenCount": 120, "candidatesTokenCount": 80 }
    })
}

pub fn outfit(title: &str, kind: &str, items: &[&str]) -> Value {
    json!({
        "title": title,
        "description": format!("{title} description"),
        "fashionGuideline": "Rule of thirds",
        "trendFactor": "Butter yellow",
        "identityMatch": "Timeless",
        "proportionNote": "Defined waist",
        "type": kind,
        "items": items,
    })
}
