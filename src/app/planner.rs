use super::dispatch::{App, expand_id};
use super::lookbook::outfit_ids;
use super::render;
use crate::cli::PlannerCommands;
use anyhow::{Context, Result, bail};
use chrono::{DateTime, Days, Utc};
use dialoguer::Password;
use std::io::IsTerminal;
use wardrobe_stylist::core::accounts::{CalendarCredentials, UserRecord};
use wardrobe_stylist::core::planner::{CalendarEvent, CalendarSource, GoogleCalendarClient};
use wardrobe_stylist::error::CalendarError;
use wardrobe_stylist::ui::style as ui;

pub const CALENDAR_TOKEN_ENV: &str = "STYLIST_CALENDAR_TOKEN";

fn event_ids(record: &UserRecord) -> impl Iterator<Item = &str> {
    record.calendar.events().iter().map(|event| event.id.as_str())
}

fn read_token(flag: Option<String>) -> Result<String> {
    if let Some(token) = flag
        .or_else(|| std::env::var(CALENDAR_TOKEN_ENV).ok())
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
    {
        return Ok(token);
    }
    if !std::io::stdin().is_terminal() {
        bail!("--token or {CALENDAR_TOKEN_ENV} is required in non-interactive mode");
    }
    Password::new()
        .with_prompt("Google Calendar access token (input hidden)")
        .allow_empty_password(false)
        .interact()
        .context("Failed to read access token from terminal")
}

pub async fn run(app: &App, command: PlannerCommands, now: DateTime<Utc>) -> Result<()> {
    let (_, mut record) = app.signed_in()?;
    let today = now.date_naive();

    match command {
        PlannerCommands::Add {
            date,
            title,
            description,
        } => {
            let title = title.trim();
            if title.is_empty() {
                bail!("event title must not be empty");
            }
            let description = description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty());
            let event = record
                .calendar
                .add(CalendarEvent::local(date, title, description));
            println!(
                "{} Planned {}",
                ui::success("✓"),
                render::event_line(event, &record.saved_outfits)
            );
            app.save(&record)
        }

        PlannerCommands::List { from, days, all } => {
            let events: Vec<&CalendarEvent> = if all {
                record.calendar.events().iter().collect()
            } else {
                let from = from.unwrap_or(today);
                let to = from
                    .checked_add_days(Days::new(days.saturating_sub(1)))
                    .unwrap_or(from);
                record.calendar.between(from, to)
            };
            if events.is_empty() {
                println!("{}", ui::dim("Nothing planned."));
            }
            for event in events {
                println!("{}", render::event_line(event, &record.saved_outfits));
            }
            Ok(())
        }

        PlannerCommands::Remove { id } => {
            let id = expand_id(&id, event_ids(&record), "event")?;
            let removed = record.calendar.remove(&id)?;
            app.save(&record)?;
            println!("{} Removed {}", ui::success("✓"), ui::value(&removed.title));
            Ok(())
        }

        PlannerCommands::Link {
            event_id,
            outfit_id,
        } => {
            let event_id = expand_id(&event_id, event_ids(&record), "event")?;
            let outfit_id = expand_id(&outfit_id, outfit_ids(&record), "outfit")?;
            let event = record
                .calendar
                .link(&event_id, &outfit_id, &record.saved_outfits)?;
            println!(
                "{} {}",
                ui::success("✓"),
                render::event_line(event, &record.saved_outfits)
            );
            app.save(&record)
        }

        PlannerCommands::Unlink { event_id } => {
            let event_id = expand_id(&event_id, event_ids(&record), "event")?;
            let event = record.calendar.unlink(&event_id)?;
            println!("{} Unlinked {}", ui::success("✓"), ui::value(&event.title));
            app.save(&record)
        }

        PlannerCommands::Connect { token } => {
            let access_token = read_token(token)?;
            record.calendar_credentials = Some(CalendarCredentials {
                access_token,
                connected_at: now,
            });
            app.save(&record)?;
            println!(
                "{} Calendar connected. Run `stylist planner sync` to pull events.",
                ui::success("✓")
            );
            Ok(())
        }

        PlannerCommands::Disconnect => {
            if record.calendar_credentials.take().is_some() {
                app.save(&record)?;
                println!("{} Calendar disconnected.", ui::success("✓"));
            } else {
                println!("{}", ui::dim("No calendar connected."));
            }
            Ok(())
        }

        PlannerCommands::Sync => {
            let credentials = record
                .calendar_credentials
                .as_ref()
                .ok_or(CalendarError::NotConnected)?;
            let source = GoogleCalendarClient::new(credentials.access_token.clone())
                .with_base_url(&app.config.calendar.base_url);
            let incoming = source.upcoming(today, app.config.calendar.sync_days).await?;
            let merged = record.calendar.merge_external(incoming);
            app.save(&record)?;
            tracing::info!(events = merged, "calendar synced");
            println!(
                "{} Synced {merged} event(s) for the next {} day(s).",
                ui::success("✓"),
                app.config.calendar.sync_days
            );
            Ok(())
        }
    }
}
