use crate::cli::commands::{Cli, Commands};
use anyhow::{Context, Result, bail};
use chrono::Utc;
use std::sync::Arc;
use wardrobe_stylist::Config;
use wardrobe_stylist::core::accounts::{AccountStore, Session, SessionStore, UserRecord};
use wardrobe_stylist::core::providers::GeminiProvider;
use wardrobe_stylist::core::stylist::StylistClient;

use super::{account, closet, lookbook, planner, status, styling};

/// Stores and settings shared by every command.
pub struct App {
    pub config: Config,
    pub accounts: AccountStore,
    pub sessions: SessionStore,
}

impl App {
    pub fn new(config: Config) -> Self {
        let data_dir = config.data_dir();
        let accounts = AccountStore::new(
            &data_dir,
            config.secret_store(),
            config.accounts.bcrypt_cost,
        );
        let sessions = SessionStore::new(&data_dir);
        Self {
            config,
            accounts,
            sessions,
        }
    }

    /// The active session and its account record.
    pub fn signed_in(&self) -> Result<(Session, UserRecord)> {
        let session = self.sessions.require()?;
        let record = self
            .accounts
            .load(&session.email)
            .with_context(|| format!("Failed to load account {}", session.email))?;
        Ok((session, record))
    }

    pub fn save(&self, record: &UserRecord) -> Result<()> {
        self.accounts.save(record)?;
        Ok(())
    }

    /// Gemini-backed client built from `[stylist]`.
    pub fn stylist_client(&self) -> Result<StylistClient> {
        let settings = self.config.stylist_settings();
        let mut provider =
            GeminiProvider::new(self.config.api_key.as_deref(), settings.timeout_secs);
        if let Some(base_url) = self.config.stylist.base_url.as_deref() {
            provider = provider.with_base_url(base_url);
        }
        if !provider.has_api_key() {
            bail!(
                "No Gemini API key configured. Set STYLIST_API_KEY or `api_key` in {}",
                self.config.config_path.display()
            );
        }
        Ok(StylistClient::new(Arc::new(provider), settings))
    }
}

pub async fn dispatch(cli: Cli, config: Config) -> Result<()> {
    let app = App::new(config);
    let now = Utc::now();

    match cli.command {
        Commands::Account { account_command } => account::run(&app, account_command, now),
        Commands::Wardrobe { wardrobe_command } => {
            closet::run_wardrobe(&app, wardrobe_command, now).await
        }
        Commands::Inspiration {
            inspiration_command,
        } => closet::run_inspiration(&app, inspiration_command).await,
        Commands::Profile { profile_command } => closet::run_profile(&app, profile_command).await,
        Commands::Context { context_command } => closet::run_context(&app, context_command),
        Commands::Style => styling::run_style(&app, now).await,
        Commands::Lookbook { lookbook_command } => lookbook::run(&app, lookbook_command, now),
        Commands::Planner { planner_command } => planner::run(&app, planner_command, now).await,
        Commands::Status => {
            println!("{}", status::render_status(&app)?);
            Ok(())
        }
    }
}

/// Resolve an id the user typed: an exact match, or a unique prefix of one.
pub fn expand_id<'a>(
    input: &str,
    candidates: impl IntoIterator<Item = &'a str>,
    kind: &str,
) -> Result<String> {
    let input = input.trim();
    if input.is_empty() {
        bail!("{kind} id must not be empty");
    }

    let mut matches = Vec::new();
    for id in candidates {
        if id == input {
            return Ok(id.to_string());
        }
        if id.starts_with(input) {
            matches.push(id);
        }
    }

    match matches.as_slice() {
        [only] => Ok((*only).to_string()),
        // Let the domain layer report the miss with its own error.
        [] => Ok(input.to_string()),
        _ => bail!("{kind} id '{input}' is ambiguous ({} matches)", matches.len()),
    }
}
