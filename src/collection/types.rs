use crate::item::types::Item;
use crate::rating::RatingWeights;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named comparison collection: the items being compared plus the rating
/// weights used to score them. Owns its items exclusively; the rating engine
/// only ever returns new item values for the collection to store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    pub version: u32,
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(flatten)]
    pub weights: RatingWeights,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Collection {
    /// Create a new empty collection with version 1 and default weights
    pub fn new(name: &str) -> Self {
        let now = Utc::now();
        Self {
            version: 1,
            id: crate::item::ops::new_item_id(),
            name: name.to_string(),
            items: Vec::new(),
            weights: RatingWeights::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the item list and bump the modification timestamp
    pub fn set_items(&mut self, items: Vec<Item>) {
        self.items = items;
        self.touch();
    }

    /// Replace the weights and bump the modification timestamp
    pub fn set_weights(&mut self, weights: RatingWeights) {
        self.weights = weights;
        self.touch();
    }

    /// Find an item by its 1-based display index (as shown in `list`)
    pub fn item_at(&self, index: usize) -> Option<&Item> {
        if index == 0 {
            return None;
        }
        self.items.get(index - 1)
    }

    /// Resolve an item reference: an exact id, or a 1-based display index
    pub fn resolve_item_id(&self, reference: &str) -> Option<String> {
        if let Some(item) = self.items.iter().find(|item| item.id == reference) {
            return Some(item.id.clone());
        }
        reference
            .parse::<usize>()
            .ok()
            .and_then(|index| self.item_at(index))
            .map(|item| item.id.clone())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
