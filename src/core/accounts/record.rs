use crate::core::lookbook::{Lookbook, SavedOutfit};
use crate::core::planner::Planner;
use crate::core::profile::StyleProfile;
use crate::core::stylist::DailyContext;
use crate::core::wardrobe::{ClothingItem, Inspiration, Wardrobe};
use crate::error::{LookbookError, WardrobeError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const RECORD_VERSION: u32 = 1;

fn default_record_version() -> u32 {
    RECORD_VERSION
}

/// OAuth access token for the external calendar. Encrypted on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarCredentials {
    pub access_token: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub connected_at: DateTime<Utc>,
}

/// Everything persisted for one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(default = "default_record_version")]
    pub version: u32,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    #[serde(default)]
    pub wardrobe: Wardrobe,
    #[serde(default)]
    pub inspiration: Inspiration,
    #[serde(default)]
    pub profile: StyleProfile,
    #[serde(default)]
    pub context: DailyContext,
    #[serde(default)]
    pub saved_outfits: Lookbook,
    #[serde(default)]
    pub calendar: Planner,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendar_credentials: Option<CalendarCredentials>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub last_active: DateTime<Utc>,
}

impl UserRecord {
    pub fn new(email: String, password_hash: String, name: String, now: DateTime<Utc>) -> Self {
        Self {
            version: RECORD_VERSION,
            email,
            password_hash,
            name,
            wardrobe: Wardrobe::default(),
            inspiration: Inspiration::default(),
            profile: StyleProfile::default(),
            context: DailyContext::default(),
            saved_outfits: Lookbook::default(),
            calendar: Planner::default(),
            calendar_credentials: None,
            last_active: now,
        }
    }

    /// Remove a wardrobe item and strip it from saved outfits.
    pub fn remove_item(&mut self, id: &str) -> Result<ClothingItem, WardrobeError> {
        let removed = self.wardrobe.remove(id)?;
        let wardrobe = &self.wardrobe;
        let pruned = self.saved_outfits.prune_items(|item| wardrobe.contains(item));
        if pruned > 0 {
            tracing::debug!(item = id, pruned, "removed item from saved outfits");
        }
        Ok(removed)
    }

    /// Remove a saved outfit and unlink it from the planner.
    pub fn remove_outfit(&mut self, id: &str) -> Result<SavedOutfit, LookbookError> {
        let removed = self.saved_outfits.remove(id)?;
        self.calendar.clear_outfit(id);
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::planner::CalendarEvent;
    use crate::core::stylist::{OutfitSuggestion, OutfitType};
    use crate::core::wardrobe::ClothingCategory;
    use crate::media::ImagePayload;
    use chrono::NaiveDate;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_750_000_000, 0).unwrap()
    }

    fn record_with_outfit() -> (UserRecord, String, String) {
        let mut record = UserRecord::new("ada@example.com".into(), "hash".into(), "Ada".into(), now());
        let keep = record
            .wardrobe
            .add(ClothingItem::new(
                ImagePayload::from_bytes(b"a", "image/png"),
                ClothingCategory::Tops,
                "Shirt",
            ))
            .id
            .clone();
        let skirt = record
            .wardrobe
            .add(ClothingItem::new(
                ImagePayload::from_bytes(b"b", "image/png"),
                ClothingCategory::Bottoms,
                "Skirt",
            ))
            .id
            .clone();
        let outfit = OutfitSuggestion {
            title: "Look".into(),
            description: "d".into(),
            fashion_guideline: "g".into(),
            trend_factor: "t".into(),
            identity_match: "i".into(),
            proportion_note: "p".into(),
            outfit_type: OutfitType::Practical,
            items: vec![keep, skirt.clone()],
            sources: vec![],
        };
        let outfit_id = record.saved_outfits.save(outfit, "Work", None, now()).id.clone();
        (record, outfit_id, skirt)
    }

    #[test]
    fn removing_item_prunes_saved_outfits() {
        let (mut record, _, skirt) = record_with_outfit();
        record.remove_item(&skirt).unwrap();
        assert_eq!(record.saved_outfits.outfits()[0].suggestion.items.len(), 1);
        assert_eq!(
            record.remove_item(&skirt).unwrap_err(),
            WardrobeError::ItemNotFound(skirt.clone())
        );
    }

    #[test]
    fn removing_outfit_clears_planner_links() {
        let (mut record, outfit_id, _) = record_with_outfit();
        let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let event_id = record
            .calendar
            .add(CalendarEvent::local(date, "Review", None))
            .id
            .clone();
        record
            .calendar
            .link(&event_id, &outfit_id, &record.saved_outfits)
            .unwrap();

        record.remove_outfit(&outfit_id).unwrap();
        assert!(record.calendar.events()[0].outfit_id.is_none());
    }

    #[test]
    fn minimal_json_fills_defaults() {
        let record: UserRecord = serde_json::from_value(serde_json::json!({
            "email": "ada@example.com",
            "passwordHash": "$2b$04$abc",
            "name": "Ada",
            "lastActive": 1_750_000_000_000_i64
        }))
        .unwrap();
        assert_eq!(record.version, RECORD_VERSION);
        assert!(record.wardrobe.is_empty());
        assert_eq!(record.profile.laundry_cycle_days, 7);
        assert_eq!(record.context.comfort, 5);
    }
}
