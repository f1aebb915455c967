pub mod backup;
pub mod password;
pub mod record;
pub mod session;
pub mod store;

pub use backup::BackupDocument;
pub use record::{CalendarCredentials, UserRecord};
pub use session::{STYLING_LOCK_FILE, Session, SessionStore, StylingLock};
pub use store::AccountStore;

use crate::error::Result;
use chrono::{DateTime, Utc};

/// Replace the account's styling data with the document's and persist it.
pub fn import_into(store: &AccountStore, record: &mut UserRecord, document: BackupDocument) -> Result<()> {
    document.apply_to(record);
    store.save(record)?;
    tracing::info!(
        email = %record.email,
        items = record.wardrobe.len(),
        outfits = record.saved_outfits.len(),
        "backup imported"
    );
    Ok(())
}

/// Create a new account from a backup, keyed by the document's email and name.
pub fn register_from_backup(
    store: &AccountStore,
    document: BackupDocument,
    password: &str,
    now: DateTime<Utc>,
) -> Result<UserRecord> {
    let mut record = store.register(&document.email, password, &document.name, now)?;
    import_into(store, &mut record, document)?;
    Ok(record)
}
