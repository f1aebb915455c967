use crate::core::stylist::OutfitSuggestion;
use crate::error::{AccountError, LookbookError, StyleError};
use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const SESSION_FILE: &str = "session.json";
pub const STYLING_LOCK_FILE: &str = "styling.lock";

/// A lock this old belongs to a run that died without cleaning up.
const STALE_LOCK_AFTER: Duration = Duration::from_secs(10 * 60);

/// The signed-in account and the looks from its last styling request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub email: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub started_at: DateTime<Utc>,
    #[serde(default)]
    pub suggestions: Vec<OutfitSuggestion>,
}

impl Session {
    pub fn new(email: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            email: email.into(),
            started_at: now,
            suggestions: Vec::new(),
        }
    }

    /// Suggestions are numbered from 1 on screen.
    pub fn suggestion(&self, number: usize) -> Result<&OutfitSuggestion, LookbookError> {
        number
            .checked_sub(1)
            .and_then(|index| self.suggestions.get(index))
            .ok_or(LookbookError::SuggestionNotFound(number))
    }
}

/// Exclusive claim on the session's styling slot. Dropping it releases the slot.
#[derive(Debug)]
pub struct StylingLock {
    path: PathBuf,
}

impl Drop for StylingLock {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            tracing::warn!(
                error = %e,
                path = %self.path.display(),
                "failed to release styling lock"
            );
        }
    }
}

pub struct SessionStore {
    path: PathBuf,
    lock_path: PathBuf,
}

impl SessionStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(SESSION_FILE),
            lock_path: data_dir.join(STYLING_LOCK_FILE),
        }
    }

    /// Claim the session for one styling request.
    ///
    /// Every process pointed at the same data directory shares the claim, so a
    /// second `style` run fails with [`StyleError::GenerationInProgress`] until
    /// the first lock is dropped or goes stale.
    pub fn begin_styling(&self) -> crate::error::Result<StylingLock> {
        if let Some(parent) = self.lock_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        if self.lock_is_stale() {
            tracing::warn!(path = %self.lock_path.display(), "replacing abandoned styling lock");
            let _ = fs::remove_file(&self.lock_path);
        }

        let mut options = fs::OpenOptions::new();
        options.write(true).create_new(true);
        match options.open(&self.lock_path) {
            Ok(mut file) => {
                let _ = writeln!(file, "{}", std::process::id());
                Ok(StylingLock {
                    path: self.lock_path.clone(),
                })
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                Err(StyleError::GenerationInProgress.into())
            }
            Err(e) => Err(anyhow::Error::new(e)
                .context(format!("Failed to create {}", self.lock_path.display()))
                .into()),
        }
    }

    fn lock_is_stale(&self) -> bool {
        fs::metadata(&self.lock_path)
            .and_then(|meta| meta.modified())
            .ok()
            .and_then(|modified| modified.elapsed().ok())
            .is_some_and(|age| age > STALE_LOCK_AFTER)
    }

    pub fn load(&self) -> anyhow::Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read session: {}", self.path.display()))?;
        match serde_json::from_str(&contents) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                tracing::warn!(error = %e, "discarding unreadable session file");
                Ok(None)
            }
        }
    }

    /// The active session, or [`AccountError::NotSignedIn`].
    pub fn require(&self) -> crate::error::Result<Session> {
        self.load()?.ok_or_else(|| AccountError::NotSignedIn.into())
    }

    pub fn save(&self, session: &Session) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write session: {}", self.path.display()))
    }

    pub fn clear(&self) -> anyhow::Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.path)
            .with_context(|| format!("Failed to remove session: {}", self.path.display()))?;
        Ok(true)
    }
}
