//! Portable export/import of an account's styling data.
//!
//! The document never contains the password hash or calendar credentials.

use super::record::UserRecord;
use crate::core::lookbook::Lookbook;
use crate::core::planner::Planner;
use crate::core::profile::StyleProfile;
use crate::core::stylist::DailyContext;
use crate::core::wardrobe::{Inspiration, Wardrobe};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const BACKUP_FORMAT: &str = "wardrobe-stylist/backup";
pub const BACKUP_VERSION: u32 = 1;

fn default_format() -> String {
    BACKUP_FORMAT.to_string()
}

fn default_version() -> u32 {
    BACKUP_VERSION
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupDocument {
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub exported_at: DateTime<Utc>,
    pub email: String,
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
}

impl BackupDocument {
    pub fn export(record: &UserRecord, now: DateTime<Utc>) -> Self {
        Self {
            format: BACKUP_FORMAT.to_string(),
            version: BACKUP_VERSION,
            exported_at: now,
            email: record.email.clone(),
            name: record.name.clone(),
            wardrobe: record.wardrobe.clone(),
            inspiration: record.inspiration.clone(),
            profile: record.profile.clone(),
            context: record.context.clone(),
            saved_outfits: record.saved_outfits.clone(),
            calendar: record.calendar.clone(),
        }
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let document: Self = serde_json::from_str(json)?;
        anyhow::ensure!(
            document.format == BACKUP_FORMAT,
            "not a wardrobe backup (format {:?})",
            document.format
        );
        anyhow::ensure!(
            document.version <= BACKUP_VERSION,
            "backup version {} is newer than this build supports",
            document.version
        );
        Ok(document)
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Replace the record's styling data. Identity and credentials are kept.
    pub fn apply_to(self, record: &mut UserRecord) {
        record.wardrobe = self.wardrobe;
        record.inspiration = self.inspiration;
        record.profile = self.profile;
        record.context = self.context;
        record.saved_outfits = self.saved_outfits;
        record.calendar = self.calendar;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::accounts::record::CalendarCredentials;
    use crate::core::profile::ProfileUpdate;
    use crate::core::stylist::{OutfitSuggestion, OutfitType};
    use crate::core::wardrobe::{ClothingCategory, ClothingItem};
    use crate::media::ImagePayload;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_750_000_000, 0).unwrap()
    }

    fn populated() -> UserRecord {
        let mut record = UserRecord::new(
            "ada@example.com".into(),
            "$2b$04$hash".into(),
            "Ada".into(),
            now(),
        );
        let id = record
            .wardrobe
            .add(ClothingItem::new(
                ImagePayload::from_bytes(b"png", "image/png"),
                ClothingCategory::Dresses,
                "Slip Dress",
            ))
            .id
            .clone();
        record
            .profile
            .apply(ProfileUpdate {
                aesthetic: Some("Quiet luxury".into()),
                laundry_cycle_days: Some(5),
                ..ProfileUpdate::default()
            })
            .unwrap();
        record.saved_outfits.save(
            OutfitSuggestion {
                title: "Evening".into(),
                description: "d".into(),
                fashion_guideline: "g".into(),
                trend_factor: "t".into(),
                identity_match: "i".into(),
                proportion_note: "p".into(),
                outfit_type: OutfitType::Bold,
                items: vec![id],
                sources: vec![],
            },
            "Event",
            None,
            now(),
        );
        record.calendar_credentials = Some(CalendarCredentials {
            access_token: "ya29.token".into(),
            connected_at: now(),
        });
        record
    }

    #[test]
    fn export_omits_secrets() {
        let json = BackupDocument::export(&populated(), now()).to_json().unwrap();
        assert!(!json.contains("$2b$04$hash"));
        assert!(!json.contains("passwordHash"));
        assert!(!json.contains("ya29.token"));
        assert!(json.contains("Slip Dress"));
    }

    #[test]
    fn export_then_import_reproduces_styling_data() {
        let source = populated();
        let json = BackupDocument::export(&source, now()).to_json().unwrap();

        let mut target = UserRecord::new("bob@example.com".into(), "other".into(), "Bob".into(), now());
        BackupDocument::from_json(&json).unwrap().apply_to(&mut target);

        assert_eq!(target.wardrobe, source.wardrobe);
        assert_eq!(target.profile, source.profile);
        assert_eq!(target.saved_outfits, source.saved_outfits);
        assert_eq!(target.email, "bob@example.com");
        assert_eq!(target.password_hash, "other");
    }

    #[test]
    fn rejects_foreign_documents() {
        assert!(BackupDocument::from_json(r#"{"format":"other","exportedAt":0,"email":"a@b.co","name":"A"}"#).is_err());
        assert!(
            BackupDocument::from_json(
                r#"{"version":99,"exportedAt":0,"email":"a@b.co","name":"A"}"#
            )
            .is_err()
        );
        assert!(BackupDocument::from_json(r#"{"exportedAt":0,"email":"a@b.co","name":"A"}"#).is_ok());
    }
}
