use super::types::{ClothingItem, InspirationImage};
use crate::error::WardrobeError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Most-recent inspiration images kept per account.
pub const MAX_INSPIRATION_IMAGES: usize = 6;

/// The user's clothing inventory, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Wardrobe {
    items: Vec<ClothingItem>,
}

impl Wardrobe {
    pub fn from_items(items: Vec<ClothingItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[ClothingItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&ClothingItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Newly uploaded pieces go to the front, as they do in the closet view.
    pub fn add(&mut self, item: ClothingItem) -> &ClothingItem {
        self.items.insert(0, item);
        &self.items[0]
    }

    pub fn remove(&mut self, id: &str) -> Result<ClothingItem, WardrobeError> {
        let index = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| WardrobeError::ItemNotFound(id.to_string()))?;
        Ok(self.items.remove(index))
    }

    pub fn mark_worn(
        &mut self,
        id: &str,
        at: DateTime<Utc>,
    ) -> Result<&ClothingItem, WardrobeError> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| WardrobeError::ItemNotFound(id.to_string()))?;
        item.last_worn = Some(at);
        Ok(item)
    }
}

/// Mood board images, capped at [`MAX_INSPIRATION_IMAGES`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inspiration {
    images: Vec<InspirationImage>,
}

impl Inspiration {
    pub fn images(&self) -> &[InspirationImage] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Append an image, evicting the oldest ones past the cap.
    pub fn add(&mut self, image: InspirationImage) {
        self.images.push(image);
        if self.images.len() > MAX_INSPIRATION_IMAGES {
            let overflow = self.images.len() - MAX_INSPIRATION_IMAGES;
            self.images.drain(..overflow);
        }
    }

    pub fn remove(&mut self, id: &str) -> Result<InspirationImage, WardrobeError> {
        let index = self
            .images
            .iter()
            .position(|image| image.id == id)
            .ok_or_else(|| WardrobeError::InspirationNotFound(id.to_string()))?;
        Ok(self.images.remove(index))
    }
}
