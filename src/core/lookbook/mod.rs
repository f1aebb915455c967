//! Saved outfits with occasion tags and 1-5 ratings.

use crate::core::stylist::OutfitSuggestion;
use crate::error::LookbookError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_OCCASIONS: [&str; 5] = ["Daily", "Work", "Date Night", "Event", "Travel"];
pub const DEFAULT_OCCASION: &str = "Daily";

const RATING_MIN: u8 = 1;
const RATING_MAX: u8 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutfitRating {
    pub comfort: u8,
    pub style: u8,
    #[serde(default)]
    pub notes: String,
}

impl OutfitRating {
    pub fn new(comfort: u8, style: u8, notes: impl Into<String>) -> Result<Self, LookbookError> {
        check_rating("comfort", comfort)?;
        check_rating("style", style)?;
        Ok(Self {
            comfort,
            style,
            notes: notes.into().trim().to_string(),
        })
    }
}

fn check_rating(field: &'static str, value: u8) -> Result<(), LookbookError> {
    if (RATING_MIN..=RATING_MAX).contains(&value) {
        Ok(())
    } else {
        Err(LookbookError::RatingOutOfRange { field, value })
    }
}

/// A suggestion the user kept, plus bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedOutfit {
    pub id: String,
    #[serde(flatten)]
    pub suggestion: OutfitSuggestion,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    pub occasion_category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<OutfitRating>,
}

/// Saved outfits, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Lookbook {
    outfits: Vec<SavedOutfit>,
}

impl Lookbook {
    pub fn from_outfits(outfits: Vec<SavedOutfit>) -> Self {
        Self { outfits }
    }

    pub fn outfits(&self) -> &[SavedOutfit] {
        &self.outfits
    }

    pub fn len(&self) -> usize {
        self.outfits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outfits.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&SavedOutfit> {
        self.outfits.iter().find(|outfit| outfit.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Keep a suggestion. A blank occasion becomes [`DEFAULT_OCCASION`].
    pub fn save(
        &mut self,
        suggestion: OutfitSuggestion,
        occasion: &str,
        rating: Option<OutfitRating>,
        at: DateTime<Utc>,
    ) -> &SavedOutfit {
        let occasion = occasion.trim();
        let saved = SavedOutfit {
            id: uuid::Uuid::new_v4().to_string(),
            suggestion,
            timestamp: at,
            occasion_category: if occasion.is_empty() {
                DEFAULT_OCCASION.to_string()
            } else {
                occasion.to_string()
            },
            rating,
        };
        self.outfits.insert(0, saved);
        &self.outfits[0]
    }

    pub fn remove(&mut self, id: &str) -> Result<SavedOutfit, LookbookError> {
        let index = self
            .outfits
            .iter()
            .position(|outfit| outfit.id == id)
            .ok_or_else(|| LookbookError::OutfitNotFound(id.to_string()))?;
        Ok(self.outfits.remove(index))
    }

    pub fn rate(&mut self, id: &str, rating: OutfitRating) -> Result<&SavedOutfit, LookbookError> {
        let outfit = self
            .outfits
            .iter_mut()
            .find(|outfit| outfit.id == id)
            .ok_or_else(|| LookbookError::OutfitNotFound(id.to_string()))?;
        outfit.rating = Some(rating);
        Ok(outfit)
    }

    /// Outfits for one occasion (case-insensitive); `None` lists everything.
    pub fn by_occasion(&self, occasion: Option<&str>) -> Vec<&SavedOutfit> {
        self.outfits
            .iter()
            .filter(|outfit| {
                occasion.is_none_or(|wanted| outfit.occasion_category.eq_ignore_ascii_case(wanted.trim()))
            })
            .collect()
    }

    /// Distinct occasions in first-seen order.
    pub fn occasions(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for outfit in &self.outfits {
            if !seen.contains(&outfit.occasion_category.as_str()) {
                seen.push(&outfit.occasion_category);
            }
        }
        seen
    }

    /// Drop wardrobe ids that no longer exist; returns how many references were removed.
    pub fn prune_items(&mut self, exists: impl Fn(&str) -> bool) -> usize {
        let mut removed = 0;
        for outfit in &mut self.outfits {
            let before = outfit.suggestion.items.len();
            outfit.suggestion.items.retain(|id| exists(id));
            removed += before - outfit.suggestion.items.len();
        }
        removed
    }
}
