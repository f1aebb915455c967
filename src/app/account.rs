use super::dispatch::App;
use super::render;
use crate::cli::AccountCommands;
use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use dialoguer::Password;
use std::io::IsTerminal;
use wardrobe_stylist::core::accounts::{
    BackupDocument, Session, import_into, register_from_backup,
};
use wardrobe_stylist::ui::style as ui;

pub const PASSWORD_ENV: &str = "STYLIST_PASSWORD";

/// Password from `STYLIST_PASSWORD`, else a hidden prompt.
pub fn read_password(prompt: &str, confirm: bool) -> Result<String> {
    if let Ok(password) = std::env::var(PASSWORD_ENV)
        && !password.is_empty()
    {
        return Ok(password);
    }
    if !std::io::stdin().is_terminal() {
        bail!("{PASSWORD_ENV} is required in non-interactive mode");
    }

    let mut input = Password::new()
        .with_prompt(prompt)
        .allow_empty_password(false);
    if confirm {
        input = input.with_confirmation("Repeat password", "Passwords do not match");
    }
    input.interact().context("Failed to read password from terminal")
}

fn start_session(app: &App, email: &str, now: DateTime<Utc>) -> Result<()> {
    app.sessions.save(&Session::new(email, now))
}

pub fn run(app: &App, command: AccountCommands, now: DateTime<Utc>) -> Result<()> {
    match command {
        AccountCommands::Register { email, name } => {
            let password = read_password("Choose a password (input hidden)", true)?;
            let record = app.accounts.register(&email, &password, &name, now)?;
            start_session(app, &record.email, now)?;
            println!(
                "{} Welcome, {}. Signed in as {}.",
                ui::success("✓"),
                ui::value(&record.name),
                record.email
            );
            Ok(())
        }

        AccountCommands::Login { email } => {
            let password = read_password("Password (input hidden)", false)?;
            let record = app.accounts.authenticate(&email, &password, now)?;
            start_session(app, &record.email, now)?;
            tracing::info!(email = %record.email, "signed in");
            println!(
                "{} Signed in as {}.",
                ui::success("✓"),
                ui::value(&record.email)
            );
            Ok(())
        }

        AccountCommands::Logout => {
            if app.sessions.clear()? {
                println!("{} Signed out.", ui::success("✓"));
            } else {
                println!("{}", ui::dim("Not signed in."));
            }
            Ok(())
        }

        AccountCommands::Whoami => {
            let (session, record) = app.signed_in()?;
            println!("{}", render::account_summary(&record, &session));
            Ok(())
        }

        AccountCommands::Export { output } => {
            let (_, record) = app.signed_in()?;
            let json = BackupDocument::export(&record, now).to_json()?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!(
                        "{} Exported {} item(s) and {} saved look(s) to {}",
                        ui::success("✓"),
                        record.wardrobe.len(),
                        record.saved_outfits.len(),
                        ui::value(path.display())
                    );
                }
                None => println!("{json}"),
            }
            Ok(())
        }

        AccountCommands::Import { path, register } => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let document = BackupDocument::from_json(&json)?;

            let record = if register {
                let password = read_password(
                    &format!("Password for {} (input hidden)", document.email),
                    true,
                )?;
                let record = register_from_backup(&app.accounts, document, &password, now)?;
                start_session(app, &record.email, now)?;
                record
            } else {
                let (_, mut record) = app.signed_in()?;
                import_into(&app.accounts, &mut record, document)?;
                record
            };

            println!(
                "{} Imported {} item(s), {} saved look(s) and {} event(s) into {}",
                ui::success("✓"),
                record.wardrobe.len(),
                record.saved_outfits.len(),
                record.calendar.len(),
                ui::value(&record.email)
            );
            Ok(())
        }

        AccountCommands::Delete => {
            let (session, _) = app.signed_in()?;
            let password = read_password("Confirm your password to delete (input hidden)", false)?;
            app.accounts.authenticate(&session.email, &password, now)?;
            app.accounts.delete(&session.email)?;
            app.sessions.clear()?;
            tracing::info!(email = %session.email, "account deleted");
            println!("{} Account {} deleted.", ui::success("✓"), session.email);
            Ok(())
        }
    }
}
