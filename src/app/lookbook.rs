use super::dispatch::{App, expand_id};
use super::render;
use crate::cli::LookbookCommands;
use anyhow::Result;
use chrono::{DateTime, Utc};
use wardrobe_stylist::core::accounts::UserRecord;
use wardrobe_stylist::core::lookbook::{DEFAULT_OCCASIONS, OutfitRating};
use wardrobe_stylist::ui::style as ui;

pub fn outfit_ids(record: &UserRecord) -> impl Iterator<Item = &str> {
    record
        .saved_outfits
        .outfits()
        .iter()
        .map(|outfit| outfit.id.as_str())
}

pub fn run(app: &App, command: LookbookCommands, now: DateTime<Utc>) -> Result<()> {
    let (session, mut record) = app.signed_in()?;

    match command {
        LookbookCommands::Save {
            number,
            occasion,
            comfort,
            style,
            notes,
        } => {
            let suggestion = session.suggestion(number)?.clone();
            let rating = match (comfort, style) {
                (Some(comfort), Some(style)) => Some(OutfitRating::new(
                    comfort,
                    style,
                    notes.unwrap_or_default(),
                )?),
                _ => None,
            };
            let saved = record.saved_outfits.save(
                suggestion,
                occasion.as_deref().unwrap_or_default(),
                rating,
                now,
            );
            println!(
                "{} Saved {} to {} {}",
                ui::success("✓"),
                ui::header(&saved.suggestion.title),
                ui::value(&saved.occasion_category),
                ui::dim(render::short_id(&saved.id))
            );
            app.save(&record)
        }

        LookbookCommands::List { occasion } => {
            let outfits = record.saved_outfits.by_occasion(occasion.as_deref());
            if outfits.is_empty() {
                println!("{}", ui::dim("No saved looks yet."));
            }
            for outfit in outfits {
                println!("{}", render::saved_outfit(outfit, &record.wardrobe));
                println!();
            }
            Ok(())
        }

        LookbookCommands::Rate {
            id,
            comfort,
            style,
            notes,
        } => {
            let id = expand_id(&id, outfit_ids(&record), "outfit")?;
            let rating = OutfitRating::new(comfort, style, notes)?;
            let rated = record.saved_outfits.rate(&id, rating)?;
            println!(
                "{} Rated {}",
                ui::success("✓"),
                ui::header(&rated.suggestion.title)
            );
            app.save(&record)
        }

        LookbookCommands::Remove { id } => {
            let id = expand_id(&id, outfit_ids(&record), "outfit")?;
            let removed = record.remove_outfit(&id)?;
            app.save(&record)?;
            println!(
                "{} Removed {}",
                ui::success("✓"),
                ui::header(&removed.suggestion.title)
            );
            Ok(())
        }

        LookbookCommands::Occasions => {
            let mut occasions: Vec<&str> = DEFAULT_OCCASIONS.to_vec();
            for occasion in record.saved_outfits.occasions() {
                if !occasions.iter().any(|known| known.eq_ignore_ascii_case(occasion)) {
                    occasions.push(occasion);
                }
            }
            for occasion in occasions {
                let count = record.saved_outfits.by_occasion(Some(occasion)).len();
                println!("{occasion} {}", ui::dim(format!("({count})")));
            }
            Ok(())
        }
    }
}
