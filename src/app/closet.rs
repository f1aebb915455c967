use super::dispatch::{App, expand_id};
use super::render;
use crate::cli::{ContextCommands, InspirationCommands, ProfileCommands, WardrobeCommands};
use anyhow::Result;
use chrono::{DateTime, Utc};
use std::path::Path;
use wardrobe_stylist::core::accounts::UserRecord;
use wardrobe_stylist::core::profile::ProfileUpdate;
use wardrobe_stylist::core::stylist::{
    BodyAnalyzer, ClassificationGuess, ClothingClassifier, DailyContext,
};
use wardrobe_stylist::core::wardrobe::{ClothingItem, InspirationImage, WardrobeFilter};
use wardrobe_stylist::media::{LoadedImage, load_image};
use wardrobe_stylist::ui::style as ui;

fn item_ids(record: &UserRecord) -> impl Iterator<Item = &str> {
    record.wardrobe.items().iter().map(|item| item.id.as_str())
}

async fn load(app: &App, path: &Path) -> Result<LoadedImage> {
    load_image(path, app.config.media.max_file_size_mb).await
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

async fn classify(app: &App, loaded: &LoadedImage, skip: bool) -> ClassificationGuess {
    if skip || !app.config.media.auto_classify {
        return ClassificationGuess::fallback();
    }
    match app.stylist_client() {
        Ok(client) => ClothingClassifier::new(client).classify(&loaded.payload).await,
        Err(e) => {
            tracing::warn!(error = %e, "skipping auto-classification");
            ClassificationGuess::fallback()
        }
    }
}

pub async fn run_wardrobe(app: &App, command: WardrobeCommands, now: DateTime<Utc>) -> Result<()> {
    let (_, mut record) = app.signed_in()?;

    match command {
        WardrobeCommands::Add {
            path,
            name,
            category,
            color,
            fit,
            classification,
            style,
            material,
            no_classify,
        } => {
            let loaded = load(app, &path).await?;
            let guess = classify(app, &loaded, no_classify).await;
            let classified = guess != ClassificationGuess::fallback();

            // Explicit flags win over the guess; an unclassified photo is named after its file.
            let name = non_blank(name).unwrap_or_else(|| {
                if classified {
                    guess.name.clone()
                } else {
                    loaded.stem.clone()
                }
            });
            let mut item = ClothingItem::new(
                loaded.payload,
                category.unwrap_or(guess.category),
                name,
            );
            item.color = non_blank(color).or(guess.color);
            item.fit = fit.or(guess.fit);
            item.classification = Some(classification.unwrap_or(guess.classification));
            item.style = non_blank(style).or(guess.style);
            item.material = non_blank(material).or(guess.material);

            let cycle = record.profile.laundry_cycle_days;
            let added = record.wardrobe.add(item);
            println!("{} Added {}", ui::success("✓"), render::item_line(added, now, cycle));
            app.save(&record)
        }

        WardrobeCommands::List {
            category,
            fit,
            classification,
            color,
            style,
        } => {
            let filter = WardrobeFilter {
                category,
                fit,
                classification,
                color,
                style,
            };
            let items = filter.apply(record.wardrobe.items());
            if items.is_empty() {
                println!("{}", ui::dim("No matching pieces."));
            }
            let cycle = record.profile.laundry_cycle_days;
            for item in items {
                println!("{}", render::item_line(item, now, cycle));
            }
            Ok(())
        }

        WardrobeCommands::Remove { id } => {
            let id = expand_id(&id, item_ids(&record), "item")?;
            let removed = record.remove_item(&id)?;
            app.save(&record)?;
            println!("{} Removed {}", ui::success("✓"), ui::value(&removed.name));
            Ok(())
        }

        WardrobeCommands::Worn { id } => {
            let id = expand_id(&id, item_ids(&record), "item")?;
            let item = record.wardrobe.mark_worn(&id, now)?;
            println!("{} Marked {} as worn today", ui::success("✓"), ui::value(&item.name));
            app.save(&record)
        }
    }
}

pub async fn run_inspiration(app: &App, command: InspirationCommands) -> Result<()> {
    let (_, mut record) = app.signed_in()?;

    match command {
        InspirationCommands::Add { path } => {
            let loaded = load(app, &path).await?;
            let image = InspirationImage::new(loaded.payload);
            let id = image.id.clone();
            record.inspiration.add(image);
            app.save(&record)?;
            println!(
                "{} Added inspiration {} ({} on the board)",
                ui::success("✓"),
                ui::dim(render::short_id(&id)),
                record.inspiration.len()
            );
            Ok(())
        }

        InspirationCommands::List => {
            if record.inspiration.is_empty() {
                println!("{}", ui::dim("No inspiration images."));
            }
            for image in record.inspiration.images() {
                println!(
                    "{}  {}",
                    ui::dim(render::short_id(&image.id)),
                    image.image.mime_type()
                );
            }
            Ok(())
        }

        InspirationCommands::Remove { id } => {
            let id = expand_id(
                &id,
                record.inspiration.images().iter().map(|i| i.id.as_str()),
                "inspiration",
            )?;
            record.inspiration.remove(&id)?;
            app.save(&record)?;
            println!("{} Removed inspiration image", ui::success("✓"));
            Ok(())
        }
    }
}

pub async fn run_profile(app: &App, command: ProfileCommands) -> Result<()> {
    let (_, mut record) = app.signed_in()?;

    match command {
        ProfileCommands::Show => {
            println!("{}", render::profile(&record.profile));
            Ok(())
        }

        ProfileCommands::Set {
            aesthetic,
            silhouettes,
            forbidden,
            signature_colors,
            body_type,
            height,
            pinterest,
            laundry_cycle_days,
        } => {
            record.profile.apply(ProfileUpdate {
                aesthetic,
                silhouettes,
                forbidden,
                signature_colors,
                body_type,
                height,
                pinterest_profile: pinterest,
                laundry_cycle_days,
            })?;
            app.save(&record)?;
            println!("{} Profile updated", ui::success("✓"));
            Ok(())
        }

        ProfileCommands::Analyze { photo } => {
            let loaded = load(app, &photo).await?;
            let analyzer = BodyAnalyzer::new(app.stylist_client()?);
            let analysis = analyzer.analyze(&loaded.payload).await?;
            record.profile.record_analysis(analysis, loaded.payload);
            app.save(&record)?;
            println!("{} Body architecture recorded", ui::success("✓"));
            println!("{}", render::profile(&record.profile));
            Ok(())
        }
    }
}

pub fn run_context(app: &App, command: ContextCommands) -> Result<()> {
    let (_, mut record) = app.signed_in()?;

    match command {
        ContextCommands::Show => {
            println!("{}", record.context.situational_prompt());
            if let Some(board) = record
                .context
                .trend_reference(record.profile.pinterest_profile.as_deref())
            {
                println!("TREND REFERENCE: {board}");
            }
            Ok(())
        }

        ContextCommands::Set {
            event,
            weather,
            location,
            vibe,
            color,
            comfort,
            pinterest,
        } => {
            let context = &mut record.context;
            for (field, value) in [
                (&mut context.event, event),
                (&mut context.weather, weather),
                (&mut context.location, location),
                (&mut context.vibe, vibe),
                (&mut context.color, color),
                (&mut context.pinterest_url, pinterest),
            ] {
                if let Some(value) = value {
                    *field = value.trim().to_string();
                }
            }
            if let Some(comfort) = comfort {
                context.comfort = comfort;
            }
            app.save(&record)?;
            println!("{} Context updated", ui::success("✓"));
            println!("{}", record.context.situational_prompt());
            Ok(())
        }

        ContextCommands::Clear => {
            record.context = DailyContext::default();
            app.save(&record)?;
            println!("{} Context reset", ui::success("✓"));
            Ok(())
        }
    }
}
