//! One JSON file per account under `<data_dir>/accounts/`.

use super::password::{hash_password, normalize_email, validate_password, verify_password};
use super::record::UserRecord;
use crate::error::{AccountError, Result, StoreError};
use crate::security::SecretStore;
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const ACCOUNTS_DIR: &str = "accounts";

pub struct AccountStore {
    dir: PathBuf,
    secrets: SecretStore,
    bcrypt_cost: u32,
}

impl AccountStore {
    pub fn new(data_dir: &Path, secrets: SecretStore, bcrypt_cost: u32) -> Self {
        Self {
            dir: data_dir.join(ACCOUNTS_DIR),
            secrets,
            bcrypt_cost,
        }
    }

    /// File for a normalised email; the name is a SHA-256 so addresses never hit the filesystem.
    pub fn account_path(&self, email: &str) -> PathBuf {
        let digest = Sha256::digest(email.as_bytes());
        self.dir.join(format!("{}.json", hex::encode(digest)))
    }

    pub fn exists(&self, email: &str) -> bool {
        normalize_email(email)
            .map(|email| self.account_path(&email).exists())
            .unwrap_or(false)
    }

    pub fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
        now: DateTime<Utc>,
    ) -> Result<UserRecord> {
        let email = normalize_email(email)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(AccountError::InvalidInput("name must not be empty".into()).into());
        }
        validate_password(password)?;
        if self.account_path(&email).exists() {
            return Err(AccountError::AlreadyExists(email).into());
        }

        let hash = hash_password(password, self.bcrypt_cost)?;
        let record = UserRecord::new(email, hash, name.to_string(), now);
        self.save(&record)?;
        tracing::info!(email = %record.email, "account registered");
        Ok(record)
    }

    /// Check credentials and bump `last_active`.
    pub fn authenticate(&self, email: &str, password: &str, now: DateTime<Utc>) -> Result<UserRecord> {
        let email = normalize_email(email).map_err(|_| AccountError::InvalidCredentials)?;
        let mut record = match self.load(&email) {
            Ok(record) => record,
            Err(crate::error::StylistError::Account(AccountError::NotFound(_))) => {
                return Err(AccountError::InvalidCredentials.into());
            }
            Err(e) => return Err(e),
        };

        if !verify_password(password, &record.password_hash) {
            tracing::warn!(email = %email, "failed sign-in attempt");
            return Err(AccountError::InvalidCredentials.into());
        }

        record.last_active = now;
        self.save(&record)?;
        Ok(record)
    }

    pub fn load(&self, email: &str) -> Result<UserRecord> {
        let email = normalize_email(email)?;
        let path = self.account_path(&email);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(AccountError::NotFound(email).into());
            }
            Err(e) => return Err(StoreError::Io(e).into()),
        };

        let mut record: UserRecord = serde_json::from_str(&contents)
            .map_err(|e| StoreError::Corrupt(email.clone(), e.to_string()))?;

        if let Some(credentials) = record.calendar_credentials.as_mut() {
            credentials.access_token = self.secrets.decrypt(&credentials.access_token)?;
        }
        Ok(record)
    }

    /// Persist via a temp file and rename so a crash never leaves half a record.
    pub fn save(&self, record: &UserRecord) -> Result<()> {
        let mut persisted = record.clone();
        if let Some(credentials) = persisted.calendar_credentials.as_mut() {
            credentials.access_token = self.secrets.encrypt(&credentials.access_token)?;
        }

        fs::create_dir_all(&self.dir).map_err(StoreError::Io)?;
        let path = self.account_path(&record.email);
        let tmp = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(&persisted).map_err(StoreError::Serde)?;
        fs::write(&tmp, json).map_err(StoreError::Io)?;
        fs::rename(&tmp, &path).map_err(StoreError::Io)?;

        tracing::debug!(path = %path.display(), "account saved");
        Ok(())
    }

    pub fn delete(&self, email: &str) -> Result<()> {
        let email = normalize_email(email)?;
        match fs::remove_file(self.account_path(&email)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(AccountError::NotFound(email).into()),
            Err(e) => Err(StoreError::Io(e).into()),
        }
    }
}
