//! Multi-part message assembly for the styling request.

use crate::core::laundry::{RewearStatus, days_since, item_status};
use crate::core::providers::Part;
use crate::core::stylist::context::DailyContext;
use crate::core::wardrobe::{ClothingItem, InspirationImage};
use crate::media::ImagePayload;
use chrono::{DateTime, Utc};
use std::fmt::Write as _;

pub const END_OF_WARDROBE: &str = "--- END OF WARDROBE ---";
pub const END_OF_INSPIRATION: &str = "--- END OF INSPIRATION ---";

const UNSPECIFIED: &str = "unspecified";

fn image_part(image: &ImagePayload) -> Part {
    Part::inline_data(image.mime_type(), image.base64_data())
}

/// Text block describing one wardrobe item; `index` is what the model returns.
pub fn item_descriptor(
    index: usize,
    item: &ClothingItem,
    now: DateTime<Utc>,
    laundry_cycle_days: u32,
) -> String {
    let fit = item.fit.map(|fit| fit.to_string());
    let classification = item.classification.map(|c| c.to_string());

    let mut text = format!("ITEM {index}: {}\n", item.name);
    let _ = writeln!(text, "Category: {}", item.category);
    let _ = writeln!(text, "Color: {}", item.color.as_deref().unwrap_or(UNSPECIFIED));
    let _ = writeln!(
        text,
        "Material: {}",
        item.material.as_deref().unwrap_or(UNSPECIFIED)
    );
    let _ = writeln!(text, "Fit: {}", fit.as_deref().unwrap_or(UNSPECIFIED));
    let _ = writeln!(
        text,
        "Classification: {}",
        classification.as_deref().unwrap_or(UNSPECIFIED)
    );
    let _ = write!(text, "Style: {}", item.style.as_deref().unwrap_or(UNSPECIFIED));

    if let Some(last_worn) = item.last_worn {
        let status = item_status(now, item, laundry_cycle_days);
        let days = days_since(now, last_worn);
        let _ = write!(
            text,
            "\nRewear Status: {} (last worn {days} day{} ago)",
            status.advisory(),
            if days == 1 { "" } else { "s" }
        );
    }

    text
}

/// Items eligible under the strict laundry filter.
pub fn wearable_items<'a>(
    wardrobe: &'a [ClothingItem],
    now: DateTime<Utc>,
    laundry_cycle_days: u32,
) -> Vec<&'a ClothingItem> {
    wardrobe
        .iter()
        .filter(|item| {
            let status: RewearStatus = item_status(now, item, laundry_cycle_days);
            status.is_wearable(item.category)
        })
        .collect()
}

/// Ordered parts: descriptors, wardrobe images, sentinel, inspiration images,
/// sentinel, situational prompt.
pub fn styling_parts(
    items: &[&ClothingItem],
    inspiration: &[InspirationImage],
    context: &DailyContext,
    now: DateTime<Utc>,
    laundry_cycle_days: u32,
) -> Vec<Part> {
    let mut parts = Vec::with_capacity(items.len() * 2 + inspiration.len() + 3);

    parts.extend(
        items
            .iter()
            .enumerate()
            .map(|(index, item)| Part::text(item_descriptor(index, item, now, laundry_cycle_days))),
    );
    parts.extend(items.iter().map(|item| image_part(&item.image)));
    parts.push(Part::text(END_OF_WARDROBE));
    parts.extend(inspiration.iter().map(|image| image_part(&image.image)));
    parts.push(Part::text(END_OF_INSPIRATION));
    parts.push(Part::text(context.situational_prompt()));

    parts
}

/// Single-image message used by classification and body analysis.
pub fn single_image_parts(image: &ImagePayload, text: &str) -> Vec<Part> {
    vec![image_part(image), Part::text(text)]
}
