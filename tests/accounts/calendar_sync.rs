use chrono::{NaiveDate, Utc};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use wardrobe_stylist::core::lookbook::Lookbook;
use wardrobe_stylist::core::planner::{
    CalendarEvent, CalendarSource, EventSource, GoogleCalendarClient, Planner,
};
use wardrobe_stylist::core::stylist::{OutfitSuggestion, OutfitType};
use wardrobe_stylist::error::CalendarError;

const EVENTS_PATH: &str = "/calendar/v3/calendars/primary/events";

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
}

fn lookbook_with_one() -> (Lookbook, String) {
    let mut lookbook = Lookbook::default();
    let id = lookbook
        .save(
            OutfitSuggestion {
                title: "Board Meeting".into(),
                description: String::new(),
                fashion_guideline: String::new(),
                trend_factor: String::new(),
                identity_match: String::new(),
                proportion_note: String::new(),
                outfit_type: OutfitType::Classic,
                items: vec!["blazer".into()],
                sources: Vec::new(),
            },
            "Work",
            None,
            Utc::now(),
        )
        .id
        .clone();
    (lookbook, id)
}

#[tokio::test]
async fn sync_fetches_window_and_merges_external_events() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(EVENTS_PATH))
        .and(header("authorization", "Bearer ya29.test-token"))
        .and(query_param("timeMin", "2026-10-19T00:00:00Z"))
        .and(query_param("timeMax", "2026-10-26T00:00:00Z"))
        .and(query_param("singleEvents", "true"))
        .and(query_param("orderBy", "startTime"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {"id": "g-board", "summary": "Board meeting",
                 "start": {"dateTime": "2026-10-21T09:00:00Z"}},
                {"id": "g-dinner", "summary": "Dinner",
                 "start": {"date": "2026-10-23"}}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (lookbook, outfit_id) = lookbook_with_one();
    let mut planner = Planner::default();
    let local = planner
        .add(CalendarEvent::local(day(20), "Dentist", None))
        .id
        .clone();

    // A previous sync left one linked event and one that has since been cancelled.
    let first = vec![
        CalendarEvent {
            id: "g-board".into(),
            date: day(21),
            title: "Board meeting (draft)".into(),
            description: None,
            outfit_id: None,
            source: EventSource::External,
        },
        CalendarEvent {
            id: "g-cancelled".into(),
            date: day(22),
            title: "Cancelled".into(),
            description: None,
            outfit_id: None,
            source: EventSource::External,
        },
    ];
    planner.merge_external(first);
    planner.link("g-board", &outfit_id, &lookbook).unwrap();

    let source = GoogleCalendarClient::new("ya29.test-token").with_base_url(&server.uri());
    let incoming = source.upcoming(day(19), 7).await.unwrap();
    assert_eq!(incoming.len(), 2);
    planner.merge_external(incoming);

    let titles: Vec<&str> = planner
        .between(day(19), day(25))
        .into_iter()
        .map(|event| event.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Dentist", "Board meeting", "Dinner"]);

    let board = planner
        .events()
        .iter()
        .find(|event| event.id == "g-board")
        .unwrap();
    assert_eq!(board.outfit_id.as_deref(), Some(outfit_id.as_str()));
    assert!(planner.events().iter().any(|event| event.id == local));
    assert!(!planner.events().iter().any(|event| event.id == "g-cancelled"));
    server.verify().await;
}

#[tokio::test]
async fn expired_token_surfaces_as_request_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(EVENTS_PATH))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_string(r#"{"error":{"message":"Invalid Credentials"}}"#),
        )
        .mount(&server)
        .await;

    let source = GoogleCalendarClient::new("stale").with_base_url(&server.uri());
    let err = source.upcoming(day(19), 7).await.unwrap_err();
    match err {
        CalendarError::Request(message) => assert!(message.contains("401")),
        other => panic!("expected request error, got {other:?}"),
    }
}

#[test]
fn linking_requires_a_saved_outfit() {
    let (lookbook, _) = lookbook_with_one();
    let mut planner = Planner::default();
    let id = planner
        .add(CalendarEvent::local(day(20), "Dentist", None))
        .id
        .clone();
    assert!(planner.link(&id, "missing", &lookbook).is_err());
}
