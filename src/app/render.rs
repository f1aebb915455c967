use chrono::{DateTime, Utc};
use std::fmt::Write as _;
use wardrobe_stylist::core::accounts::{Session, UserRecord};
use wardrobe_stylist::core::laundry::{RewearStatus, item_status};
use wardrobe_stylist::core::lookbook::{Lookbook, SavedOutfit};
use wardrobe_stylist::core::planner::{CalendarEvent, EventSource};
use wardrobe_stylist::core::profile::StyleProfile;
use wardrobe_stylist::core::stylist::OutfitSuggestion;
use wardrobe_stylist::core::wardrobe::{ClothingItem, Wardrobe};
use wardrobe_stylist::ui::style as ui;

const SHORT_ID_LEN: usize = 8;

pub fn short_id(id: &str) -> &str {
    id.get(..SHORT_ID_LEN).unwrap_or(id)
}

fn or_dash(value: &str) -> &str {
    if value.trim().is_empty() { "-" } else { value }
}

/// `3f2a9c1e  Silk Blouse  Tops · Ivory · Tailored · Statement  [worn yesterday]`
pub fn item_line(item: &ClothingItem, now: DateTime<Utc>, laundry_cycle_days: u32) -> String {
    let mut details = vec![item.category.to_string()];
    details.extend(item.color.clone());
    details.extend(item.fit.map(|fit| fit.to_string()));
    details.extend(item.classification.map(|c| c.to_string()));
    details.extend(item.material.clone());

    let mut line = format!(
        "{}  {}  {}",
        ui::dim(short_id(&item.id)),
        ui::value(&item.name),
        details.join(" · ")
    );
    let status = item_status(now, item, laundry_cycle_days);
    if status != RewearStatus::Clean {
        let _ = write!(line, "  {}", ui::warn(format!("[{}]", status.advisory())));
    }
    line
}

fn item_names(ids: &[String], wardrobe: &Wardrobe) -> Vec<String> {
    ids.iter()
        .map(|id| {
            wardrobe
                .find(id)
                .map_or_else(|| format!("(removed {})", short_id(id)), |item| item.name.clone())
        })
        .collect()
}

fn suggestion_body(out: &mut String, suggestion: &OutfitSuggestion, wardrobe: &Wardrobe) {
    let _ = writeln!(out, "   {}", suggestion.description);
    let pieces = if suggestion.items.is_empty() {
        ui::dim("none matched your wardrobe")
    } else {
        item_names(&suggestion.items, wardrobe).join(", ")
    };
    let _ = writeln!(out, "   {} {}", ui::label("Pieces:"), pieces);
    let _ = writeln!(out, "   {} {}", ui::label("Guideline:"), suggestion.fashion_guideline);
    let _ = writeln!(out, "   {} {}", ui::label("Trend:"), suggestion.trend_factor);
    let _ = write!(out, "   {} {}", ui::label("Identity:"), suggestion.identity_match);
    if !suggestion.proportion_note.trim().is_empty() {
        let _ = write!(
            out,
            "\n   {} {}",
            ui::label("Proportions:"),
            suggestion.proportion_note
        );
    }
    for source in &suggestion.sources {
        let _ = write!(out, "\n   {} {}", ui::dim(&source.title), ui::url(&source.uri));
    }
}

/// One freshly generated look, numbered for `lookbook save`.
pub fn suggestion(number: usize, suggestion: &OutfitSuggestion, wardrobe: &Wardrobe) -> String {
    let mut out = format!(
        "{} {} {}\n",
        ui::accent(format!("{number}.")),
        ui::header(&suggestion.title),
        ui::dim(format!("({})", suggestion.outfit_type))
    );
    suggestion_body(&mut out, suggestion, wardrobe);
    out
}

pub fn saved_outfit(outfit: &SavedOutfit, wardrobe: &Wardrobe) -> String {
    let mut out = format!(
        "{} {} {} {}\n",
        ui::dim(short_id(&outfit.id)),
        ui::header(&outfit.suggestion.title),
        ui::value(&outfit.occasion_category),
        ui::dim(outfit.timestamp.format("%Y-%m-%d"))
    );
    if let Some(rating) = &outfit.rating {
        let _ = write!(
            out,
            "   {} comfort {}/5, style {}/5",
            ui::label("Rating:"),
            rating.comfort,
            rating.style
        );
        if !rating.notes.is_empty() {
            let _ = write!(out, " ({})", rating.notes);
        }
        out.push('\n');
    }
    suggestion_body(&mut out, &outfit.suggestion, wardrobe);
    out
}

pub fn event_line(event: &CalendarEvent, lookbook: &Lookbook) -> String {
    let mut line = format!(
        "{}  {}  {}",
        ui::dim(short_id(&event.id)),
        event.date.format("%a %Y-%m-%d"),
        ui::value(&event.title)
    );
    if event.source == EventSource::External {
        let _ = write!(line, " {}", ui::dim("(google)"));
    }
    if let Some(outfit_id) = &event.outfit_id {
        let look = lookbook
            .find(outfit_id)
            .map_or("(missing look)", |outfit| outfit.suggestion.title.as_str());
        let _ = write!(line, "  {} {}", ui::label("wearing"), ui::header(look));
    }
    line
}

pub fn profile(profile: &StyleProfile) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", ui::header("Style DNA"));
    let _ = writeln!(out, "  {} {}", ui::label("Aesthetic:"), or_dash(&profile.aesthetic));
    let _ = writeln!(out, "  {} {}", ui::label("Silhouettes:"), or_dash(&profile.silhouettes));
    let _ = writeln!(out, "  {} {}", ui::label("Never:"), or_dash(&profile.forbidden));
    let _ = writeln!(out, "  {} {}", ui::label("Colours:"), or_dash(&profile.signature_colors));
    let _ = writeln!(
        out,
        "  {} {}",
        ui::label("Pinterest:"),
        profile.pinterest_profile.as_deref().unwrap_or("-")
    );
    let _ = writeln!(
        out,
        "  {} {} day(s)",
        ui::label("Laundry cycle:"),
        profile.laundry_cycle_days
    );
    let _ = writeln!(out, "{}", ui::header("Body architecture"));
    match &profile.ai_analysis {
        Some(analysis) => {
            let _ = writeln!(out, "  {} {}", ui::label("Shape:"), analysis.body_shape);
            let _ = writeln!(out, "  {} {}", ui::label("Proportions:"), analysis.proportions);
            let _ = writeln!(out, "  {} {}", ui::label("Height:"), analysis.height_estimate);
            let _ = write!(out, "  {} {}", ui::label("Focus:"), analysis.suggested_focus);
        }
        None => {
            let _ = writeln!(
                out,
                "  {} {}",
                ui::label("Body type:"),
                profile.body_type.as_deref().unwrap_or("-")
            );
            let _ = write!(
                out,
                "  {} {}",
                ui::label("Height:"),
                profile.height.as_deref().unwrap_or("-")
            );
        }
    }
    out
}

pub fn account_summary(record: &UserRecord, session: &Session) -> String {
    format!(
        "{} <{}>\n  {} {}\n  {} {}",
        ui::header(&record.name),
        record.email,
        ui::label("Signed in:"),
        session.started_at.format("%Y-%m-%d %H:%M UTC"),
        ui::label("Last active:"),
        record.last_active.format("%Y-%m-%d %H:%M UTC"),
    )
}
