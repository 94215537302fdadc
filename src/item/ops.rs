use super::types::{Item, Tag};
use crate::rating::{recalculate_all_ratings, RatingWeights};
use chrono::Utc;

/// Validated input for creating a new item. No id, timestamp, or rating:
/// those are assigned here.
#[derive(Debug, Clone, Default)]
pub struct ItemDraft {
    pub url: String,
    pub title: String,
    pub description: String,
    pub images: Vec<String>,
    pub price: f64,
    pub currency: String,
    pub pros: Vec<Tag>,
    pub cons: Vec<Tag>,
}

/// Partial update: only supplied fields are merged into the matching item.
#[derive(Debug, Clone, Default)]
pub struct ItemPatch {
    pub url: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub images: Option<Vec<String>>,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub pros: Option<Vec<Tag>>,
    pub cons: Option<Vec<Tag>>,
}

/// Result of [`create_item`]: the assigned item plus the rated full list.
#[derive(Debug, Clone)]
pub struct CreatedItem {
    pub item: Item,
    pub items: Vec<Item>,
}

/// Generate an item id unique within a collection: millisecond timestamp
/// plus a short random suffix.
pub fn new_item_id() -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("{}{}", Utc::now().timestamp_millis(), &suffix[..9])
}

/// Create an item from a draft: assign a fresh id and creation timestamp,
/// prepend it to the list, and recompute every rating against the new
/// snapshot.
pub fn create_item(draft: ItemDraft, all_items: &[Item], weights: &RatingWeights) -> CreatedItem {
    let item = Item {
        id: new_item_id(),
        url: draft.url,
        title: draft.title,
        description: draft.description,
        images: draft.images,
        price: draft.price,
        currency: draft.currency,
        pros: draft.pros,
        cons: draft.cons,
        rating: 0.0,
        created_date: Utc::now(),
    };

    let mut updated: Vec<Item> = Vec::with_capacity(all_items.len() + 1);
    updated.push(item.clone());
    updated.extend(all_items.iter().cloned());

    let items = recalculate_all_ratings(&updated, weights);
    let item = items[0].clone();

    CreatedItem { item, items }
}

/// Merge a patch into the item with the given id, then recompute every
/// rating. An unknown id leaves the list contents unchanged; the pass
/// degrades to a plain recompute.
pub fn update_item(
    id: &str,
    patch: ItemPatch,
    all_items: &[Item],
    weights: &RatingWeights,
) -> Vec<Item> {
    let updated: Vec<Item> = all_items
        .iter()
        .map(|item| {
            if item.id != id {
                return item.clone();
            }
            let mut merged = item.clone();
            if let Some(url) = &patch.url {
                merged.url = url.clone();
            }
            if let Some(title) = &patch.title {
                merged.title = title.clone();
            }
            if let Some(description) = &patch.description {
                merged.description = description.clone();
            }
            if let Some(images) = &patch.images {
                merged.images = images.clone();
            }
            if let Some(price) = patch.price {
                merged.price = price;
            }
            if let Some(currency) = &patch.currency {
                merged.currency = currency.clone();
            }
            if let Some(pros) = &patch.pros {
                merged.pros = pros.clone();
            }
            if let Some(cons) = &patch.cons {
                merged.cons = cons.clone();
            }
            merged
        })
        .collect();

    recalculate_all_ratings(&updated, weights)
}

/// Remove an item by id. Remaining items keep their current ratings: the
/// cross-item statistics shift, but re-rating after delete is the caller's
/// policy, not forced here.
pub fn delete_item(id: &str, all_items: &[Item]) -> Vec<Item> {
    all_items
        .iter()
        .filter(|item| item.id != id)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn draft(title: &str, price: f64) -> ItemDraft {
        ItemDraft {
            url: format!("https://shop.example/{}", title),
            title: title.to_string(),
            price,
            currency: "USD".to_string(),
            ..ItemDraft::default()
        }
    }

    #[test]
    fn test_create_on_empty_collection() {
        let weights = RatingWeights::default();
        let created = create_item(draft("kettle", 0.0), &[], &weights);

        assert!(!created.item.id.is_empty());
        assert_eq!(created.items.len(), 1);
        assert_eq!(created.items[0].id, created.item.id);
        // Bare item in a single-item collection sits at the 50 center
        assert_eq!(created.item.rating, 50.0);
        assert!(created.item.age().num_seconds() < 5);
    }

    #[test]
    fn test_create_prepends_and_rerates_everyone() {
        let weights = RatingWeights::default();
        let first = create_item(draft("cheap", 10.0), &[], &weights);
        let second = create_item(draft("pricey", 100.0), &first.items, &weights);

        assert_eq!(second.items.len(), 2);
        assert_eq!(second.items[0].title, "pricey");
        assert_eq!(second.items[1].title, "cheap");
        // The existing item was re-rated against the new price range
        assert_eq!(second.items[1].rating, 70.0);
        assert_eq!(second.items[0].rating, 50.0);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut seen = HashSet::new();
        for _ in 0..100 {
            assert!(seen.insert(new_item_id()));
        }
    }

    #[test]
    fn test_update_merges_only_supplied_fields() {
        let weights = RatingWeights::default();
        let created = create_item(draft("kettle", 30.0), &[], &weights);
        let id = created.item.id.clone();

        let patch = ItemPatch {
            price: Some(25.0),
            pros: Some(vec![Tag {
                text: "fast boil".to_string(),
                impact: 7,
            }]),
            ..ItemPatch::default()
        };
        let items = update_item(&id, patch, &created.items, &weights);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "kettle");
        assert_eq!(items[0].price, 25.0);
        assert_eq!(items[0].pros.len(), 1);
        // Rating was recomputed for the new pros
        assert!(items[0].rating > 50.0);
    }

    #[test]
    fn test_update_preserves_id_and_created_date() {
        let weights = RatingWeights::default();
        let created = create_item(draft("kettle", 30.0), &[], &weights);
        let id = created.item.id.clone();
        let stamp = created.item.created_date;

        let items = update_item(
            &id,
            ItemPatch {
                title: Some("better kettle".to_string()),
                ..ItemPatch::default()
            },
            &created.items,
            &weights,
        );
        assert_eq!(items[0].id, id);
        assert_eq!(items[0].created_date, stamp);
    }

    #[test]
    fn test_update_unknown_id_is_a_recompute_pass() {
        let weights = RatingWeights::default();
        let created = create_item(draft("kettle", 30.0), &[], &weights);

        let items = update_item(
            "no-such-id",
            ItemPatch {
                price: Some(1.0),
                ..ItemPatch::default()
            },
            &created.items,
            &weights,
        );
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].price, 30.0);
        assert_eq!(items[0].rating, created.items[0].rating);
    }

    #[test]
    fn test_delete_removes_without_rerating() {
        let weights = RatingWeights::default();
        let first = create_item(draft("cheap", 10.0), &[], &weights);
        let second = create_item(draft("pricey", 100.0), &first.items, &weights);
        let cheap_rating = second.items[1].rating;
        assert_eq!(cheap_rating, 70.0);

        let pricey_id = second.items[0].id.clone();
        let remaining = delete_item(&pricey_id, &second.items);

        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].title, "cheap");
        // Rating is stale on purpose: delete does not force a recompute
        assert_eq!(remaining[0].rating, cheap_rating);
    }

    #[test]
    fn test_delete_unknown_id_keeps_everything() {
        let weights = RatingWeights::default();
        let created = create_item(draft("kettle", 30.0), &[], &weights);
        let remaining = delete_item("no-such-id", &created.items);
        assert_eq!(remaining.len(), 1);
    }
}
