use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use wardrobe_stylist::core::profile::BodyAnalysis;
use wardrobe_stylist::core::stylist::{BodyAnalyzer, ClassificationGuess, ClothingClassifier};
use wardrobe_stylist::core::wardrobe::{ClothingCategory, ClothingClassification, ClothingFit};
use wardrobe_stylist::error::StyleError;

use super::fixtures::{GENERATE_PATH, client, gemini_reply, photo, settings};

async fn mount_reply(server: &MockServer, body: Value) {
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn classification_fills_metadata_without_search() {
    let server = MockServer::start().await;
    mount_reply(
        &server,
        gemini_reply(&json!({
            "category": "Outerwear",
            "name": "Camel Trench Coat",
            "color": "Camel",
            "fit": "Relaxed",
            "classification": "Statement",
            "style": "Classic",
            "material": "Cotton gabardine"
        })),
    )
    .await;

    let classifier = ClothingClassifier::new(client(&server, settings()));
    let guess = classifier.classify(&photo()).await;

    assert_eq!(guess.category, ClothingCategory::Outerwear);
    assert_eq!(guess.name, "Camel Trench Coat");
    assert_eq!(guess.fit, Some(ClothingFit::Relaxed));
    assert_eq!(guess.classification, ClothingClassification::Statement);
    assert_eq!(guess.material.as_deref(), Some("Cotton gabardine"));

    let received = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&received[0].body).unwrap();
    assert!(body.get("tools").is_none());
    assert_eq!(
        body["contents"][0]["parts"][0]["inlineData"]["mimeType"],
        "image/png"
    );
    server.verify().await;
}

#[tokio::test]
async fn classification_falls_back_on_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .expect(1)
        .mount(&server)
        .await;

    let classifier = ClothingClassifier::new(client(&server, settings()));
    assert_eq!(
        classifier.classify(&photo()).await,
        ClassificationGuess::fallback()
    );
    server.verify().await;
}

#[tokio::test]
async fn classification_falls_back_on_unknown_category() {
    let server = MockServer::start().await;
    mount_reply(
        &server,
        gemini_reply(&json!({
            "category": "Hats",
            "name": "Beret",
            "color": "Black",
            "classification": "Basic"
        })),
    )
    .await;

    let classifier = ClothingClassifier::new(client(&server, settings()));
    let guess = classifier.classify(&photo()).await;
    assert_eq!(guess, ClassificationGuess::fallback());
    assert_eq!(guess.name, "New Item");
}

#[tokio::test]
async fn body_analysis_round_trips_fields() {
    let server = MockServer::start().await;
    mount_reply(
        &server,
        gemini_reply(&json!({
            "bodyShape": "Hourglass",
            "proportions": "Balanced shoulders and hips, defined waist",
            "suggestedFocus": "Highlight the waist",
            "heightEstimate": "Average"
        })),
    )
    .await;

    let analyzer = BodyAnalyzer::new(client(&server, settings()));
    let analysis = analyzer.analyze(&photo()).await.unwrap();
    assert_eq!(
        analysis,
        BodyAnalysis {
            body_shape: "Hourglass".into(),
            proportions: "Balanced shoulders and hips, defined waist".into(),
            suggested_focus: "Highlight the waist".into(),
            height_estimate: "Average".into(),
        }
    );
}

#[tokio::test]
async fn body_analysis_failure_is_user_facing() {
    let server = MockServer::start().await;
    mount_reply(&server, gemini_reply(&json!({ "note": "not a person" }))).await;

    let analyzer = BodyAnalyzer::new(client(&server, settings()));
    let err = analyzer.analyze(&photo()).await.unwrap_err();
    assert_eq!(err, StyleError::AnalysisFailed);
}
