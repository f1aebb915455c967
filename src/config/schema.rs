use crate::core::planner::google::DEFAULT_CALENDAR_BASE_URL;
use crate::core::stylist::{DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS, StylistSettings};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const CONFIG_DIR_NAME: &str = ".wardrobe-stylist";
pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding config.toml and the secret key - not serialized
    #[serde(skip)]
    pub config_dir: PathBuf,
    /// Path to config.toml - not serialized
    #[serde(skip)]
    pub config_path: PathBuf,
    /// Gemini API key; encrypted on disk when `secrets.encrypt` is on.
    pub api_key: Option<String>,

    #[serde(default)]
    pub stylist: StylistConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub accounts: AccountsConfig,

    #[serde(default)]
    pub calendar: CalendarConfig,

    #[serde(default)]
    pub secrets: SecretsConfig,

    #[serde(default)]
    pub media: MediaConfig,
}

// ── Stylist ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StylistConfig {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Ground outfit generation with Google Search.
    #[serde(default = "default_true")]
    pub web_search: bool,
    /// Hard-filter worn and laundered items instead of only annotating them.
    #[serde(default)]
    pub enforce_laundry: bool,
    /// Override for the Gemini API host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_temperature() -> f64 {
    0.7
}

fn default_max_output_tokens() -> u32 {
    8192
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_true() -> bool {
    true
}

impl Default for StylistConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
            timeout_secs: default_timeout_secs(),
            web_search: true,
            enforce_laundry: false,
            base_url: None,
        }
    }
}

// ── Storage ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Where accounts and the session live. `~` is expanded; defaults to `<config_dir>/data`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<String>,
}

// ── Accounts ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountsConfig {
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

fn default_bcrypt_cost() -> u32 {
    12
}

impl Default for AccountsConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

// ── Calendar ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarConfig {
    #[serde(default = "default_calendar_base_url")]
    pub base_url: String,
    #[serde(default = "default_sync_days")]
    pub sync_days: u64,
}

fn default_calendar_base_url() -> String {
    DEFAULT_CALENDAR_BASE_URL.to_string()
}

fn default_sync_days() -> u64 {
    crate::core::planner::SYNC_WINDOW_DAYS
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            base_url: default_calendar_base_url(),
            sync_days: default_sync_days(),
        }
    }
}

// ── Secrets ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecretsConfig {
    #[serde(default = "default_true")]
    pub encrypt: bool,
}

impl Default for SecretsConfig {
    fn default() -> Self {
        Self { encrypt: true }
    }
}

// ── Media ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    #[serde(default = "default_max_file_size_mb")]
    pub max_file_size_mb: u64,
    /// Ask the model to fill in metadata for new wardrobe photos.
    #[serde(default = "default_true")]
    pub auto_classify: bool,
}

fn default_max_file_size_mb() -> u64 {
    10
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: default_max_file_size_mb(),
            auto_classify: true,
        }
    }
}

impl Config {
    /// Resolved data directory.
    pub fn data_dir(&self) -> PathBuf {
        match self.storage.data_dir.as_deref().map(str::trim) {
            Some(dir) if !dir.is_empty() => PathBuf::from(shellexpand::tilde(dir).into_owned()),
            _ => self.config_dir.join("data"),
        }
    }

    pub fn stylist_settings(&self) -> StylistSettings {
        StylistSettings {
            model: self.stylist.model.clone(),
            temperature: self.stylist.temperature,
            max_output_tokens: self.stylist.max_output_tokens,
            timeout_secs: self.stylist.timeout_secs,
            web_search: self.stylist.web_search,
            enforce_laundry: self.stylist.enforce_laundry,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stylist.model.trim().is_empty() {
            return Err(ConfigError::Validation("stylist.model must not be empty".into()));
        }
        if !(0.0..=2.0).contains(&self.stylist.temperature) {
            return Err(ConfigError::Validation(format!(
                "stylist.temperature must be within 0.0..=2.0 (got {})",
                self.stylist.temperature
            )));
        }
        if self.stylist.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "stylist.timeout_secs must be at least 1".into(),
            ));
        }
        if !(4..=31).contains(&self.accounts.bcrypt_cost) {
            return Err(ConfigError::Validation(format!(
                "accounts.bcrypt_cost must be within 4..=31 (got {})",
                self.accounts.bcrypt_cost
            )));
        }
        if !(1..=31).contains(&self.calendar.sync_days) {
            return Err(ConfigError::Validation(format!(
                "calendar.sync_days must be within 1..=31 (got {})",
                self.calendar.sync_days
            )));
        }
        if self.media.max_file_size_mb == 0 {
            return Err(ConfigError::Validation(
                "media.max_file_size_mb must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.stylist.model, DEFAULT_MODEL);
        assert!(config.stylist.web_search);
        assert!(!config.stylist.enforce_laundry);
        assert_eq!(config.calendar.sync_days, 7);
        assert!(config.secrets.encrypt);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn sections_parse() {
        let config: Config = toml::from_str(
            r#"
            api_key = "k"

            [stylist]
            model = "gemini-2.5-pro"
            enforce_laundry = true

            [storage]
            data_dir = "/var/lib/stylist"

            [accounts]
            bcrypt_cost = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.stylist.model, "gemini-2.5-pro");
        assert!(config.stylist_settings().enforce_laundry);
        assert_eq!(config.data_dir(), PathBuf::from("/var/lib/stylist"));
        assert_eq!(config.accounts.bcrypt_cost, 10);
    }

    #[test]
    fn data_dir_defaults_under_config_dir() {
        let config = Config {
            config_dir: PathBuf::from("/home/ada/.wardrobe-stylist"),
            ..Config::default()
        };
        assert_eq!(
            config.data_dir(),
            PathBuf::from("/home/ada/.wardrobe-stylist/data")
        );
    }

    #[test]
    fn validation_rejects_out_of_range_values() {
        let mut config = Config::default();
        config.stylist.temperature = 3.5;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.accounts.bcrypt_cost = 2;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.stylist.timeout_secs = 0;
        assert!(config.validate().is_err());
    }
}
