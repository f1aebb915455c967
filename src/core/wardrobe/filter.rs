use super::types::{ClothingCategory, ClothingClassification, ClothingFit, ClothingItem};

/// Closet view filter. Enumerated fields match exactly; colour and style match
/// case-insensitive substrings. `None` means "All".
#[derive(Debug, Clone, Default)]
pub struct WardrobeFilter {
    pub category: Option<ClothingCategory>,
    pub fit: Option<ClothingFit>,
    pub classification: Option<ClothingClassification>,
    pub color: Option<String>,
    pub style: Option<String>,
}

impl WardrobeFilter {
    pub fn matches(&self, item: &ClothingItem) -> bool {
        if self.category.is_some_and(|category| item.category != category) {
            return false;
        }
        if self.fit.is_some() && item.fit != self.fit {
            return false;
        }
        if self.classification.is_some() && item.classification != self.classification {
            return false;
        }
        if !contains_ignore_case(item.color.as_deref(), self.color.as_deref()) {
            return false;
        }
        contains_ignore_case(item.style.as_deref(), self.style.as_deref())
    }

    pub fn apply<'a>(&self, items: &'a [ClothingItem]) -> Vec<&'a ClothingItem> {
        items.iter().filter(|item| self.matches(item)).collect()
    }
}

// An item without the field passes, matching the closet search box behaviour.
fn contains_ignore_case(haystack: Option<&str>, needle: Option<&str>) -> bool {
    let Some(needle) = needle.map(str::trim).filter(|n| !n.is_empty()) else {
        return true;
    };
    haystack.is_none_or(|h| h.to_lowercase().contains(&needle.to_lowercase()))
}
