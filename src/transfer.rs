use crate::item::ops::new_item_id;
use crate::item::types::Item;
use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

/// Encode an item list as a base64 JSON blob suitable for pasting.
pub fn export_items(items: &[Item]) -> Result<String> {
    let json = serde_json::to_vec(items).context("Failed to serialize items for export")?;
    Ok(BASE64.encode(json))
}

/// Decode a pasted export blob and append its items to an existing list.
///
/// Imported records may be partial: missing ids get a fresh one and a
/// missing `created_date` defaults to now (via the item's serde defaults).
/// Ratings come in as-is; callers re-rate the merged list before storing it.
pub fn import_items(encoded: &str, existing: &[Item]) -> Result<Vec<Item>> {
    let trimmed = encoded.trim();
    if trimmed.is_empty() {
        anyhow::bail!("Nothing to import");
    }

    let bytes = BASE64
        .decode(trimmed)
        .context("Import data is not valid base64")?;
    let mut imported: Vec<Item> =
        serde_json::from_slice(&bytes).context("Import data is not a valid item list")?;

    for item in &mut imported {
        if item.id.is_empty() {
            item.id = new_item_id();
        }
    }

    let mut merged = existing.to_vec();
    merged.extend(imported);
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ops::{create_item, ItemDraft};
    use crate::rating::RatingWeights;

    fn sample_items() -> Vec<Item> {
        let weights = RatingWeights::default();
        let first = create_item(
            ItemDraft {
                title: "kettle".to_string(),
                price: 25.0,
                ..ItemDraft::default()
            },
            &[],
            &weights,
        );
        let second = create_item(
            ItemDraft {
                title: "toaster".to_string(),
                price: 40.0,
                ..ItemDraft::default()
            },
            &first.items,
            &weights,
        );
        second.items
    }

    #[test]
    fn test_export_import_roundtrip() {
        let items = sample_items();
        let blob = export_items(&items).unwrap();
        let merged = import_items(&blob, &[]).unwrap();

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].title, items[0].title);
        assert_eq!(merged[0].id, items[0].id);
        assert_eq!(merged[1].price, items[1].price);
    }

    #[test]
    fn test_import_appends_after_existing() {
        let existing = sample_items();
        let incoming = vec![existing[0].clone()];
        let blob = export_items(&incoming).unwrap();

        let merged = import_items(&blob, &existing).unwrap();
        assert_eq!(merged.len(), 3);
        assert_eq!(merged[2].title, existing[0].title);
    }

    #[test]
    fn test_import_assigns_missing_ids() {
        // Hand-built payload without ids or timestamps
        let json = r#"[{"title": "bare", "price": 5.0}]"#;
        let blob = BASE64.encode(json);

        let merged = import_items(&blob, &[]).unwrap();
        assert_eq!(merged.len(), 1);
        assert!(!merged[0].id.is_empty());
    }

    #[test]
    fn test_import_rejects_garbage() {
        assert!(import_items("", &[]).is_err());
        assert!(import_items("not base64!!!", &[]).is_err());

        let blob = BASE64.encode(r#"{"not": "an array"}"#);
        assert!(import_items(&blob, &[]).is_err());
    }
}
