use super::engine::TeraEngine;
use crate::core::profile::StyleProfile;
use tera::Context;

const STYLING_TEMPLATE: &str = "\
You are \"The Lady's Personal Stylist\".
Your primary goal is to provide THREE distinct outfit options from the user's WARDROBE that strictly adhere to their PERMANENT STYLE PROFILE.

## Style DNA
- Core Aesthetic: {{ aesthetic }}
- Preferred Silhouettes: {{ silhouettes }}
- Signature Colors: {{ signature_colors }}
- Forbidden Styles/Items: {{ forbidden }}
Forbidden styles and items are HARD EXCLUSIONS. Never include them, whatever the situation.

## Body Architecture
{% if analysis %}\
- Body Shape: {{ analysis.bodyShape }}
- Proportions: {{ analysis.proportions }}
- Height: {{ analysis.heightEstimate }}
- Suggested Focus: {{ analysis.suggestedFocus }}
{% else %}\
- Body Type: {{ body_type }}
- Height: {{ height }}
{% endif %}\
Dress this architecture and explain the balance you chose in \"proportionNote\".

## Dress Code
- Black tie, gala or formal evening: floor-length gowns or full-length formal separates only.
- Cocktail or semi-formal: knee-length or midi dresses, or elevated tailored separates.
- Business or smart casual: tailored separates; no athletic or beach pieces.
- Casual or daily: relaxed separates and layers, still deliberate.
Never undershoot the formality of the EVENT.

## Composition Rules
- Rule of thirds: break the look at roughly one third / two thirds (tuck or crop at the natural waist, long over short). Avoid an even half split.
- Basics and statements: use at most ONE piece classified \"Statement\" per look unless the vibe or aesthetic is explicitly maximalist. Build the rest from \"Basic\" pieces.
- Color harmony: commit to one palette (monochrome, analogous, or a single complementary accent), anchored in the signature colors when given.
- Honour each item's Rewear Status. Pieces worn recently or still in the laundry are unavailable unless the user explicitly asks for them.

## Looks
1. \"Classic\": elegant and timeless, the purest form of their profile.
2. \"Practical\": weather and comfort optimised, but still stylish.
3. \"Bold\": fashion-forward, experimenting with their profile in new ways.
{% if trend_reference %}
## Trend Reference
Research the current aesthetic of this board: {{ trend_reference }}
Identify its recurring themes (palette, silhouettes, textures) and replicate its Visual DNA using only the user's wardrobe. Name those themes in \"trendFactor\".
{% endif %}
## Output
Wardrobe images follow the ITEM descriptors in the same order, then \"--- END OF WARDROBE ---\", then inspiration images, then \"--- END OF INSPIRATION ---\", then the situation.
Return exactly {{ outfit_count }} outfits as JSON matching the schema. \"items\" lists the ITEM indices (as strings) of the wardrobe pieces used. Inspiration images are references only and never items.";

/// Instruction for the best-effort upload classifier.
pub const CLASSIFICATION_INSTRUCTION: &str = "\
Identify the single clothing item in this photo for a wardrobe catalogue.
Return JSON matching the schema: the category, a short display name (e.g. \"Ivory Silk Blouse\"), \
the dominant color, the fit if visible, whether it is a \"Basic\" or a \"Statement\" piece, \
a one or two word style (e.g. \"Minimalist\", \"Preppy\"), and the main material if recognisable.";

/// Instruction for the full-length body architecture analysis.
pub const ANALYSIS_INSTRUCTION: &str = "\
You are a professional stylist analysing a full-length photo to guide future outfit choices.
Describe the body shape (e.g. Hourglass, Pear, Rectangle, Inverted Triangle, Apple), \
the key proportions (torso to leg ratio, shoulder to hip balance), an estimated height, \
and one suggested styling focus that flatters this architecture.
Be respectful and factual. Return JSON matching the schema.";

const STYLING_NAME: &str = "styling";

fn or_fallback(value: &str, fallback: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Render the system instruction for outfit generation.
pub fn build_styling_instruction(
    engine: &mut TeraEngine,
    profile: &StyleProfile,
    trend_reference: Option<&str>,
    outfit_count: usize,
) -> anyhow::Result<String> {
    // `add_template` overwrites silently, so we always register.
    engine.add_template(STYLING_NAME, STYLING_TEMPLATE)?;

    let mut ctx = Context::new();
    ctx.insert(
        "aesthetic",
        &or_fallback(&profile.aesthetic, "Sophisticated and Timeless"),
    );
    ctx.insert(
        "silhouettes",
        &or_fallback(&profile.silhouettes, "Tailored and Balanced"),
    );
    ctx.insert(
        "signature_colors",
        &or_fallback(&profile.signature_colors, "Neutral and Cohesive"),
    );
    ctx.insert("forbidden", &or_fallback(&profile.forbidden, "None"));
    ctx.insert("analysis", &profile.ai_analysis);
    ctx.insert(
        "body_type",
        &or_fallback(profile.body_type.as_deref().unwrap_or_default(), "Not specified"),
    );
    ctx.insert(
        "height",
        &or_fallback(profile.height.as_deref().unwrap_or_default(), "Not specified"),
    );
    ctx.insert("trend_reference", &trend_reference.unwrap_or_default());
    ctx.insert("outfit_count", &outfit_count);

    engine.render(STYLING_NAME, &ctx)
}
