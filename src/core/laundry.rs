//! Rewear / laundry-cycle heuristic.
//!
//! The status is advisory text for the model. It only becomes a hard filter
//! when `stylist.enforce_laundry` is switched on.

use crate::core::wardrobe::{ClothingCategory, ClothingItem};
use chrono::{DateTime, Utc};
use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum RewearStatus {
    Clean,
    WornToday,
    WornYesterday,
    InLaundry,
}

impl RewearStatus {
    /// Advisory sentence injected next to the item in the styling request.
    pub fn advisory(self) -> &'static str {
        match self {
            Self::Clean => "clean and ready to wear",
            Self::WornToday => "worn today, avoid unless explicitly requested",
            Self::WornYesterday => "worn yesterday, strictly avoid for Tops category",
            Self::InLaundry => "likely still in laundry",
        }
    }

    /// Whether a strict pre-filter should keep an item of `category`.
    pub fn is_wearable(self, category: ClothingCategory) -> bool {
        match self {
            Self::Clean => true,
            Self::WornYesterday => category != ClothingCategory::Tops,
            Self::WornToday | Self::InLaundry => false,
        }
    }
}

/// Whole days elapsed since `last_worn`; future timestamps count as today.
pub fn days_since(now: DateTime<Utc>, last_worn: DateTime<Utc>) -> i64 {
    (now - last_worn).num_days().max(0)
}

pub fn rewear_status(
    now: DateTime<Utc>,
    last_worn: Option<DateTime<Utc>>,
    laundry_cycle_days: u32,
) -> RewearStatus {
    let Some(last_worn) = last_worn else {
        return RewearStatus::Clean;
    };

    match days_since(now, last_worn) {
        0 => RewearStatus::WornToday,
        1 => RewearStatus::WornYesterday,
        days if days < i64::from(laundry_cycle_days) => RewearStatus::InLaundry,
        _ => RewearStatus::Clean,
    }
}

pub fn item_status(now: DateTime<Utc>, item: &ClothingItem, laundry_cycle_days: u32) -> RewearStatus {
    rewear_status(now, item.last_worn, laundry_cycle_days)
}
