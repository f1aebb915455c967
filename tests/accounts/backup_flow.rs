use chrono::{NaiveDate, Utc};
use tempfile::TempDir;

use wardrobe_stylist::core::accounts::{
    AccountStore, BackupDocument, Session, SessionStore, import_into, register_from_backup,
};
use wardrobe_stylist::core::lookbook::OutfitRating;
use wardrobe_stylist::core::planner::CalendarEvent;
use wardrobe_stylist::core::stylist::{OutfitSuggestion, OutfitType};
use wardrobe_stylist::core::wardrobe::ClothingCategory;
use wardrobe_stylist::error::{AccountError, StylistError};
use wardrobe_stylist::security::SecretStore;

use super::fixtures::item;

const BCRYPT_TEST_COST: u32 = 4;

fn store(dir: &TempDir) -> AccountStore {
    AccountStore::new(
        &dir.path().join("data"),
        SecretStore::new(dir.path(), true),
        BCRYPT_TEST_COST,
    )
}

fn look(items: Vec<String>) -> OutfitSuggestion {
    OutfitSuggestion {
        title: "Sunday Market".into(),
        description: "Relaxed layers.".into(),
        fashion_guideline: "Rule of thirds".into(),
        trend_factor: "Quiet luxury".into(),
        identity_match: "Timeless".into(),
        proportion_note: String::new(),
        outfit_type: OutfitType::Practical,
        items,
        sources: Vec::new(),
    }
}

#[test]
fn export_then_import_restores_styling_data() {
    let dir = TempDir::new().unwrap();
    let accounts = store(&dir);
    let now = Utc::now();

    let mut source = accounts
        .register("Ada@Example.com", "correct horse", "Ada", now)
        .unwrap();
    let trench = item("Camel Trench", ClothingCategory::Outerwear);
    let trench_id = trench.id.clone();
    source.wardrobe.add(trench);
    source.profile.aesthetic = "Quiet luxury".into();
    let saved_id = source
        .saved_outfits
        .save(
            look(vec![trench_id.clone()]),
            "Weekend",
            Some(OutfitRating::new(4, 5, "keeper").unwrap()),
            now,
        )
        .id
        .clone();
    let event = source.calendar.add(CalendarEvent::local(
        NaiveDate::from_ymd_opt(2026, 11, 2).unwrap(),
        "Market",
        None,
    ));
    let event_id = event.id.clone();
    source
        .calendar
        .link(&event_id, &saved_id, &source.saved_outfits)
        .unwrap();
    accounts.save(&source).unwrap();

    let json = BackupDocument::export(&source, now).to_json().unwrap();
    assert!(!json.contains(&source.password_hash));

    let mut target = accounts
        .register("grace@example.com", "another secret", "Grace", now)
        .unwrap();
    import_into(&accounts, &mut target, BackupDocument::from_json(&json).unwrap()).unwrap();

    let reloaded = accounts.load("grace@example.com").unwrap();
    assert_eq!(reloaded.name, "Grace");
    assert_eq!(reloaded.wardrobe.find(&trench_id).unwrap().name, "Camel Trench");
    assert_eq!(reloaded.profile.aesthetic, "Quiet luxury");
    let saved = reloaded.saved_outfits.find(&saved_id).unwrap();
    assert_eq!(saved.occasion_category, "Weekend");
    assert_eq!(saved.rating.as_ref().unwrap().style, 5);
    assert_eq!(
        reloaded.calendar.events()[0].outfit_id.as_deref(),
        Some(saved_id.as_str())
    );

    // Importing never changes who can sign in.
    assert!(
        accounts
            .authenticate("grace@example.com", "another secret", now)
            .is_ok()
    );
}

#[test]
fn register_from_backup_creates_a_new_account() {
    let dir = TempDir::new().unwrap();
    let accounts = store(&dir);
    let now = Utc::now();

    let mut original = accounts
        .register("ada@example.com", "correct horse", "Ada", now)
        .unwrap();
    original
        .wardrobe
        .add(item("Silk Blouse", ClothingCategory::Tops));
    let document = BackupDocument::export(&original, now);
    accounts.delete("ada@example.com").unwrap();

    let restored = register_from_backup(&accounts, document, "fresh password", now).unwrap();
    assert_eq!(restored.email, "ada@example.com");
    assert_eq!(restored.wardrobe.len(), 1);

    let err = accounts
        .authenticate("ada@example.com", "correct horse", now)
        .unwrap_err();
    assert!(matches!(
        err,
        StylistError::Account(AccountError::InvalidCredentials)
    ));
    assert!(
        accounts
            .authenticate("ada@example.com", "fresh password", now)
            .is_ok()
    );
}

#[test]
fn removing_items_and_outfits_keeps_references_consistent() {
    let dir = TempDir::new().unwrap();
    let accounts = store(&dir);
    let now = Utc::now();

    let mut record = accounts
        .register("ada@example.com", "correct horse", "Ada", now)
        .unwrap();
    let blouse = item("Silk Blouse", ClothingCategory::Tops);
    let skirt = item("Pleated Skirt", ClothingCategory::Bottoms);
    let (blouse_id, skirt_id) = (blouse.id.clone(), skirt.id.clone());
    record.wardrobe.add(blouse);
    record.wardrobe.add(skirt);
    let saved_id = record
        .saved_outfits
        .save(look(vec![blouse_id.clone(), skirt_id.clone()]), "", None, now)
        .id
        .clone();
    let event_id = record
        .calendar
        .add(CalendarEvent::local(
            NaiveDate::from_ymd_opt(2026, 11, 3).unwrap(),
            "Brunch",
            None,
        ))
        .id
        .clone();
    record
        .calendar
        .link(&event_id, &saved_id, &record.saved_outfits)
        .unwrap();

    record.remove_item(&blouse_id).unwrap();
    assert_eq!(
        record.saved_outfits.find(&saved_id).unwrap().suggestion.items,
        vec![skirt_id]
    );

    record.remove_outfit(&saved_id).unwrap();
    assert!(record.calendar.events()[0].outfit_id.is_none());
    accounts.save(&record).unwrap();
}

#[test]
fn session_keeps_last_suggestions_for_saving() {
    let dir = TempDir::new().unwrap();
    let sessions = SessionStore::new(dir.path());
    assert!(sessions.load().unwrap().is_none());

    let mut session = Session::new("ada@example.com", Utc::now());
    session.suggestions = vec![look(vec!["a".into()]), look(vec!["b".into()])];
    sessions.save(&session).unwrap();

    let loaded = sessions.require().unwrap();
    assert_eq!(loaded.suggestion(2).unwrap().items, vec!["b".to_string()]);
    assert!(loaded.suggestion(0).is_err());
    assert!(loaded.suggestion(3).is_err());

    assert!(sessions.clear().unwrap());
    assert!(sessions.require().is_err());
}
