//! Outfit planner: dated events, optionally linked to saved outfits.

pub mod google;

pub use google::{CalendarSource, GoogleCalendarClient, SYNC_WINDOW_DAYS};

use crate::core::lookbook::Lookbook;
use crate::error::LookbookError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EventSource {
    Local,
    External,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub date: NaiveDate,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outfit_id: Option<String>,
    pub source: EventSource,
}

impl CalendarEvent {
    pub fn local(date: NaiveDate, title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            date,
            title: title.into(),
            description,
            outfit_id: None,
            source: EventSource::Local,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Planner {
    events: Vec<CalendarEvent>,
}

impl Planner {
    pub fn from_events(events: Vec<CalendarEvent>) -> Self {
        Self { events }
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn add(&mut self, event: CalendarEvent) -> &CalendarEvent {
        self.events.push(event);
        let last = self.events.len() - 1;
        &self.events[last]
    }

    pub fn remove(&mut self, id: &str) -> Result<CalendarEvent, LookbookError> {
        let index = self
            .events
            .iter()
            .position(|event| event.id == id)
            .ok_or_else(|| LookbookError::EventNotFound(id.to_string()))?;
        Ok(self.events.remove(index))
    }

    fn event_mut(&mut self, id: &str) -> Result<&mut CalendarEvent, LookbookError> {
        self.events
            .iter_mut()
            .find(|event| event.id == id)
            .ok_or_else(|| LookbookError::EventNotFound(id.to_string()))
    }

    /// Attach a saved outfit; the outfit must exist in `lookbook`.
    pub fn link(
        &mut self,
        event_id: &str,
        outfit_id: &str,
        lookbook: &Lookbook,
    ) -> Result<&CalendarEvent, LookbookError> {
        if !lookbook.contains(outfit_id) {
            return Err(LookbookError::OutfitNotFound(outfit_id.to_string()));
        }
        let event = self.event_mut(event_id)?;
        event.outfit_id = Some(outfit_id.to_string());
        Ok(event)
    }

    pub fn unlink(&mut self, event_id: &str) -> Result<&CalendarEvent, LookbookError> {
        let event = self.event_mut(event_id)?;
        event.outfit_id = None;
        Ok(event)
    }

    /// Clear every link to `outfit_id`; returns how many events were touched.
    pub fn clear_outfit(&mut self, outfit_id: &str) -> usize {
        let mut cleared = 0;
        for event in &mut self.events {
            if event.outfit_id.as_deref() == Some(outfit_id) {
                event.outfit_id = None;
                cleared += 1;
            }
        }
        cleared
    }

    /// Events with `from <= date <= to`, ordered by date then title.
    pub fn between(&self, from: NaiveDate, to: NaiveDate) -> Vec<&CalendarEvent> {
        let mut events: Vec<&CalendarEvent> = self
            .events
            .iter()
            .filter(|event| event.date >= from && event.date <= to)
            .collect();
        events.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.title.cmp(&b.title)));
        events
    }

    /// Replace all previously synced events. Local events stay; links on
    /// external events that come back with the same id are kept.
    pub fn merge_external(&mut self, incoming: Vec<CalendarEvent>) -> usize {
        let previous: Vec<CalendarEvent> = self
            .events
            .iter()
            .filter(|event| event.source == EventSource::External)
            .cloned()
            .collect();
        self.events
            .retain(|event| event.source == EventSource::Local);

        let count = incoming.len();
        for mut event in incoming {
            event.source = EventSource::External;
            if event.outfit_id.is_none() {
                event.outfit_id = previous
                    .iter()
                    .find(|old| old.id == event.id)
                    .and_then(|old| old.outfit_id.clone());
            }
            self.events.push(event);
        }
        count
    }
}
