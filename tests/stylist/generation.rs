use chrono::{Duration, Utc};
use serde_json::{Value, json};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use wardrobe_stylist::core::profile::StyleProfile;
use wardrobe_stylist::core::stylist::{
    DailyContext, OutfitGenerator, OutfitType, StylingRequest, StylistSettings,
};
use wardrobe_stylist::core::wardrobe::{ClothingCategory, ClothingItem};
use wardrobe_stylist::error::StyleError;

use super::fixtures::{
    GENERATE_PATH, TEST_API_KEY, client, gemini_reply, item, outfit, settings,
};

fn closet() -> Vec<ClothingItem> {
    vec![
        item("Ivory Silk Blouse", ClothingCategory::Tops),
        item("Charcoal Wide-Leg Trousers", ClothingCategory::Bottoms),
    ]
}

async fn generate(
    generator: &OutfitGenerator,
    wardrobe: &[ClothingItem],
    context: &DailyContext,
) -> Result<Vec<wardrobe_stylist::core::stylist::OutfitSuggestion>, StyleError> {
    let profile = StyleProfile {
        aesthetic: "Quiet luxury".into(),
        forbidden: "Neon, logos".into(),
        ..StyleProfile::default()
    };
    generator
        .generate(StylingRequest {
            wardrobe,
            inspiration: &[],
            profile: &profile,
            context,
            now: Utc::now(),
        })
        .await
}

async fn request_body(server: &MockServer) -> Value {
    let received = server
        .received_requests()
        .await
        .expect("mock server should record received requests");
    assert_eq!(received.len(), 1);
    serde_json::from_slice(&received[0].body).expect("request body should be JSON")
}

#[tokio::test]
async fn out_of_range_indices_are_dropped() {
    let server = MockServer::start().await;
    let wardrobe = closet();

    let payload = json!({
        "outfits": [
            outfit("Gallery Opening", "Classic", &["0", "7"]),
            outfit("Errand Run", "Practical", &["1", "1"]),
            outfit("Phantom", "Bold", &["12"]),
        ]
    });
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", TEST_API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply(&payload)))
        .expect(1)
        .mount(&server)
        .await;

    let generator = OutfitGenerator::new(client(&server, settings()));
    let outfits = generate(&generator, &wardrobe, &DailyContext::default())
        .await
        .unwrap();

    assert_eq!(outfits.len(), 3);
    assert_eq!(outfits[0].title, "Gallery Opening");
    assert_eq!(outfits[0].outfit_type, OutfitType::Classic);
    assert_eq!(outfits[0].items, vec![wardrobe[0].id.clone()]);
    assert_eq!(outfits[1].items, vec![wardrobe[1].id.clone()]);
    assert_eq!(outfits[2].title, "Phantom");
    assert!(outfits[2].items.is_empty());
    assert!(!generator.is_busy());
    server.verify().await;
}

#[tokio::test]
async fn request_carries_schema_search_and_sentinels() {
    let server = MockServer::start().await;
    let wardrobe = closet();
    let payload = json!({
        "outfits": [
            outfit("A", "Classic", &["0", "1"]),
            outfit("B", "Practical", &["1"]),
            outfit("C", "Bold", &["0"]),
        ]
    });
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply(&payload)))
        .mount(&server)
        .await;

    let context = DailyContext {
        event: "Gallery opening".into(),
        pinterest_url: "https://pinterest.com/ada/fall".into(),
        ..DailyContext::default()
    };
    let generator = OutfitGenerator::new(client(&server, settings()));
    generate(&generator, &wardrobe, &context).await.unwrap();

    let body = request_body(&server).await;
    assert!(body["tools"][0].get("googleSearch").is_some());
    assert_eq!(
        body["generationConfig"]["responseMimeType"],
        "application/json"
    );
    assert_eq!(
        body["generationConfig"]["responseSchema"]["properties"]["outfits"]["maxItems"],
        3
    );

    let system = body["systemInstruction"]["parts"][0]["text"]
        .as_str()
        .unwrap();
    assert!(system.contains("Neon, logos"));
    assert!(system.contains("https://pinterest.com/ada/fall"));

    let texts: Vec<&str> = body["contents"][0]["parts"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|part| part["text"].as_str())
        .collect();
    assert!(texts.iter().any(|t| t.starts_with("ITEM 0: Ivory Silk Blouse")));
    assert!(texts.contains(&"--- END OF WARDROBE ---"));
    assert!(texts.contains(&"--- END OF INSPIRATION ---"));
    assert!(texts.last().unwrap().contains("EVENT: Gallery opening"));
}

#[tokio::test]
async fn small_wardrobe_never_calls_the_model() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let generator = OutfitGenerator::new(client(&server, settings()));
    let wardrobe = vec![item("Lonely Blazer", ClothingCategory::Outerwear)];
    let err = generate(&generator, &wardrobe, &DailyContext::default())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        StyleError::InsufficientWardrobe {
            available: 1,
            required: 2
        }
    );
    server.verify().await;
}

#[tokio::test]
async fn laundry_filter_applies_before_the_minimum_check() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut wardrobe = closet();
    wardrobe[0].last_worn = Some(Utc::now() - Duration::hours(2));

    let strict = StylistSettings {
        enforce_laundry: true,
        ..settings()
    };
    let generator = OutfitGenerator::new(client(&server, strict));
    let err = generate(&generator, &wardrobe, &DailyContext::default())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        StyleError::InsufficientWardrobe { available: 1, .. }
    ));
    server.verify().await;
}

#[tokio::test]
async fn server_error_becomes_styling_failed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend exploded"))
        .expect(1)
        .mount(&server)
        .await;

    let generator = OutfitGenerator::new(client(&server, settings()));
    let err = generate(&generator, &closet(), &DailyContext::default())
        .await
        .unwrap_err();

    assert_eq!(err, StyleError::StylingFailed);
    assert!(!generator.is_busy());
}

#[tokio::test]
async fn grounding_chunks_become_sources() {
    let server = MockServer::start().await;
    let payload = json!({
        "outfits": [
            outfit("A", "Classic", &["0"]),
            outfit("B", "Practical", &["1"]),
            outfit("C", "Bold", &["0", "1"]),
        ]
    });
    let mut reply = gemini_reply(&payload);
    reply["candidates"][0]["groundingMetadata"] = json!({
        "groundingChunks": [
            { "web": { "uri": "https://vogue.com/fall-trends", "title": "Vogue" } },
            { "web": { "uri": "https://vogue.com/fall-trends", "title": "Vogue again" } },
            { "web": { "uri": "https://elle.com/colour" } },
            { "web": { "uri": "javascript:alert(1)", "title": "bad" } }
        ]
    });
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply))
        .mount(&server)
        .await;

    let generator = OutfitGenerator::new(client(&server, settings()));
    let outfits = generate(&generator, &closet(), &DailyContext::default())
        .await
        .unwrap();

    let sources = &outfits[0].sources;
    assert_eq!(sources.len(), 2);
    assert_eq!(sources[0].title, "Vogue");
    assert_eq!(sources[1].title, "Fashion Source");
    assert_eq!(outfits[2].sources, *sources);
}
