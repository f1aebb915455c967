pub mod analysis;
pub mod classifier;
pub mod client;
pub mod context;
pub mod generator;
pub mod request;
pub mod schema;
pub mod types;

pub use analysis::BodyAnalyzer;
pub use classifier::ClothingClassifier;
pub use client::{DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS, StylistClient, StylistSettings};
pub use context::DailyContext;
pub use generator::{MIN_WARDROBE_ITEMS, OutfitGenerator, StylingRequest};
pub use types::{ClassificationGuess, GroundingSource, OutfitSuggestion, OutfitType};
