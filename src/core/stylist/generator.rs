//! Outfit generation: request assembly, model call, index resolution.

use super::client::{StructuredCall, StylistClient, parse_json, response_text};
use super::context::DailyContext;
use super::request::{styling_parts, wearable_items};
use super::schema::{OUTFITS_PER_REQUEST, outfits_schema};
use super::types::{GroundingSource, OutfitSuggestion, OutfitType};
use crate::core::profile::StyleProfile;
use crate::core::providers::GenerateContentResponse;
use crate::core::wardrobe::{ClothingItem, InspirationImage};
use crate::error::StyleError;
use crate::prompt::{TeraEngine, build_styling_instruction};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};

pub const MIN_WARDROBE_ITEMS: usize = 2;
const DEFAULT_SOURCE_TITLE: &str = "Fashion Source";

/// Everything one styling request reads.
pub struct StylingRequest<'a> {
    pub wardrobe: &'a [ClothingItem],
    pub inspiration: &'a [InspirationImage],
    pub profile: &'a StyleProfile,
    pub context: &'a DailyContext,
    pub now: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct RawOutfits {
    outfits: Vec<RawOutfit>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawOutfit {
    title: String,
    description: String,
    fashion_guideline: String,
    trend_factor: String,
    identity_match: String,
    proportion_note: String,
    #[serde(rename = "type")]
    outfit_type: OutfitType,
    items: Vec<String>,
}

/// Clears the in-flight flag when the request ends, however it ends.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct OutfitGenerator {
    client: StylistClient,
    in_flight: AtomicBool,
}

impl OutfitGenerator {
    pub fn new(client: StylistClient) -> Self {
        Self {
            client,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Produce up to three looks whose `items` are wardrobe ids.
    pub async fn generate(
        &self,
        request: StylingRequest<'_>,
    ) -> Result<Vec<OutfitSuggestion>, StyleError> {
        let settings = self.client.settings();
        let cycle = request.profile.laundry_cycle_days;

        let candidates: Vec<&ClothingItem> = if settings.enforce_laundry {
            wearable_items(request.wardrobe, request.now, cycle)
        } else {
            request.wardrobe.iter().collect()
        };

        if candidates.len() < MIN_WARDROBE_ITEMS {
            return Err(StyleError::InsufficientWardrobe {
                available: candidates.len(),
                required: MIN_WARDROBE_ITEMS,
            });
        }

        let _guard = InFlight::acquire(&self.in_flight).ok_or(StyleError::GenerationInProgress)?;

        let trend_reference = request
            .context
            .trend_reference(request.profile.pinterest_profile.as_deref());

        let mut engine = TeraEngine::new();
        let instruction = build_styling_instruction(
            &mut engine,
            request.profile,
            trend_reference,
            OUTFITS_PER_REQUEST,
        )
        .map_err(|e| {
            tracing::error!(error = %e, "failed to render styling instruction");
            StyleError::StylingFailed
        })?;

        tracing::debug!(
            items = candidates.len(),
            inspiration = request.inspiration.len(),
            trend = trend_reference.is_some(),
            "requesting outfits"
        );

        let call = StructuredCall {
            parts: styling_parts(
                &candidates,
                request.inspiration,
                request.context,
                request.now,
                cycle,
            ),
            system_instruction: Some(instruction),
            schema: outfits_schema(),
            web_search: settings.web_search,
        };

        let response = self.client.invoke(call).await.map_err(|e| {
            tracing::warn!(error = %e, "outfit generation failed");
            StyleError::StylingFailed
        })?;

        let outfits = parse_outfits(&response, self.client.provider_name(), &candidates)
            .map_err(|e| {
                tracing::warn!(error = %e, "outfit response rejected");
                StyleError::StylingFailed
            })?;

        tracing::info!(outfits = outfits.len(), "outfits generated");
        Ok(outfits)
    }
}

fn parse_outfits(
    response: &GenerateContentResponse,
    provider: &str,
    candidates: &[&ClothingItem],
) -> anyhow::Result<Vec<OutfitSuggestion>> {
    let text = response_text(response, provider)?;
    let raw: RawOutfits = parse_json(&text)?;
    let sources = grounding_sources(response);

    let outfits = raw
        .outfits
        .into_iter()
        .take(OUTFITS_PER_REQUEST)
        .map(|outfit| {
            let items = resolve_indices(&outfit.items, candidates);
            if items.len() < outfit.items.len() {
                tracing::debug!(
                    title = %outfit.title,
                    kept = items.len(),
                    returned = outfit.items.len(),
                    "dropped unresolvable item indices"
                );
            }
            OutfitSuggestion {
                title: outfit.title,
                description: outfit.description,
                fashion_guideline: outfit.fashion_guideline,
                trend_factor: outfit.trend_factor,
                identity_match: outfit.identity_match,
                proportion_note: outfit.proportion_note,
                outfit_type: outfit.outfit_type,
                items,
                sources: sources.clone(),
            }
        })
        .collect();

    Ok(outfits)
}

/// Map index strings to item ids, dropping anything that does not resolve.
pub fn resolve_indices(indices: &[String], candidates: &[&ClothingItem]) -> Vec<String> {
    let mut seen = HashSet::new();
    indices
        .iter()
        .map(String::as_str)
        .filter_map(leading_index)
        .filter_map(|index| candidates.get(index).copied())
        .filter(|item| seen.insert(item.id.clone()))
        .map(|item| item.id.clone())
        .collect()
}

/// Integer prefix of `raw` after leading whitespace, so `"1.0"` and `"2 (trousers)"`
/// still resolve. Negative or digit-free strings yield `None`.
fn leading_index(raw: &str) -> Option<usize> {
    let trimmed = raw.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    unsigned[..end].parse().ok()
}

/// Web citations with a usable http(s) URI, deduplicated by URI.
pub fn grounding_sources(response: &GenerateContentResponse) -> Vec<GroundingSource> {
    let mut seen = HashSet::new();
    response
        .grounding_chunks()
        .iter()
        .filter_map(|chunk| chunk.web.as_ref())
        .filter_map(|web| {
            let uri = web.uri.as_deref()?.trim();
            let parsed = url::Url::parse(uri).ok()?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return None;
            }
            let title = web
                .title
                .as_deref()
                .map(str::trim)
                .filter(|title| !title.is_empty())
                .unwrap_or(DEFAULT_SOURCE_TITLE);
            Some(GroundingSource {
                title: title.to_string(),
                uri: uri.to_string(),
            })
        })
        .filter(|source| seen.insert(source.uri.clone()))
        .collect()
}
