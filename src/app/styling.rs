use super::dispatch::App;
use super::render;
use anyhow::Result;
use chrono::{DateTime, Utc};
use wardrobe_stylist::core::stylist::{OutfitGenerator, StylingRequest};
use wardrobe_stylist::ui::style as ui;

pub async fn run_style(app: &App, now: DateTime<Utc>) -> Result<()> {
    let (mut session, record) = app.signed_in()?;
    let _lock = app.sessions.begin_styling()?;
    let generator = OutfitGenerator::new(app.stylist_client()?);

    println!("{}", ui::dim("Consulting your stylist..."));
    let suggestions = generator
        .generate(StylingRequest {
            wardrobe: record.wardrobe.items(),
            inspiration: record.inspiration.images(),
            profile: &record.profile,
            context: &record.context,
            now,
        })
        .await?;

    for (index, suggestion) in suggestions.iter().enumerate() {
        println!();
        println!("{}", render::suggestion(index + 1, suggestion, &record.wardrobe));
    }
    println!();
    println!(
        "{}",
        ui::dim("Keep a look with `stylist lookbook save <number> --occasion <name>`.")
    );

    session.suggestions = suggestions;
    app.sessions.save(&session)
}
