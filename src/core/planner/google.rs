//! Read-only Google Calendar v3 listing.

use super::{CalendarEvent, EventSource};
use crate::core::providers::{build_provider_client, sanitize_api_error};
use crate::error::CalendarError;
use async_trait::async_trait;
use chrono::{DateTime, Days, NaiveDate, SecondsFormat, Utc};
use reqwest::Client;
use serde::Deserialize;

pub const DEFAULT_CALENDAR_BASE_URL: &str = "https://www.googleapis.com";
pub const SYNC_WINDOW_DAYS: u64 = 7;
const UNTITLED: &str = "(No title)";

/// Anything that can list upcoming external events.
#[async_trait]
pub trait CalendarSource: Send + Sync {
    async fn upcoming(
        &self,
        from: NaiveDate,
        days: u64,
    ) -> Result<Vec<CalendarEvent>, CalendarError>;
}

#[derive(Debug, Deserialize)]
struct EventsPage {
    #[serde(default)]
    items: Vec<GoogleEvent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleEvent {
    id: String,
    summary: Option<String>,
    description: Option<String>,
    start: Option<EventTime>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventTime {
    date: Option<NaiveDate>,
    date_time: Option<String>,
}

impl EventTime {
    fn day(&self) -> Option<NaiveDate> {
        if let Some(date) = self.date {
            return Some(date);
        }
        let raw = self.date_time.as_deref()?;
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.date_naive())
    }
}

impl GoogleEvent {
    fn into_event(self) -> Option<CalendarEvent> {
        let date = self.start.as_ref()?.day()?;
        Some(CalendarEvent {
            id: self.id,
            date,
            title: self
                .summary
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| UNTITLED.to_string()),
            description: self.description.filter(|d| !d.trim().is_empty()),
            outfit_id: None,
            source: EventSource::External,
        })
    }
}

pub struct GoogleCalendarClient {
    access_token: String,
    base_url: String,
    client: Client,
}

impl GoogleCalendarClient {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            base_url: DEFAULT_CALENDAR_BASE_URL.to_string(),
            client: build_provider_client(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    fn window(from: NaiveDate, days: u64) -> (String, String) {
        let start = from.and_time(chrono::NaiveTime::MIN).and_utc();
        let end = start
            .checked_add_days(Days::new(days))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        (
            start.to_rfc3339_opts(SecondsFormat::Secs, true),
            end.to_rfc3339_opts(SecondsFormat::Secs, true),
        )
    }
}

#[async_trait]
impl CalendarSource for GoogleCalendarClient {
    async fn upcoming(
        &self,
        from: NaiveDate,
        days: u64,
    ) -> Result<Vec<CalendarEvent>, CalendarError> {
        let (time_min, time_max) = Self::window(from, days);
        let url = format!("{}/calendar/v3/calendars/primary/events", self.base_url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(&[
                ("timeMin", time_min.as_str()),
                ("timeMax", time_max.as_str()),
                ("singleEvents", "true"),
                ("orderBy", "startTime"),
            ])
            .send()
            .await
            .map_err(|e| CalendarError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CalendarError::Request(format!(
                "HTTP {status}: {}",
                sanitize_api_error(&body)
            )));
        }

        let page: EventsPage = response
            .json()
            .await
            .map_err(|e| CalendarError::Request(format!("unreadable events page: {e}")))?;

        let events: Vec<CalendarEvent> = page
            .items
            .into_iter()
            .filter_map(GoogleEvent::into_event)
            .collect();
        tracing::debug!(count = events.len(), "calendar events fetched");
        Ok(events)
    }
}
