mod closet;
mod filter;
mod types;

pub use closet::{Inspiration, MAX_INSPIRATION_IMAGES, Wardrobe};
pub use filter::WardrobeFilter;
pub use types::{
    ClothingCategory, ClothingClassification, ClothingFit, ClothingItem, InspirationImage,
};
