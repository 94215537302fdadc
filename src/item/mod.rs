pub mod ops;
pub mod types;

pub use ops::{create_item, delete_item, new_item_id, update_item, CreatedItem, ItemDraft, ItemPatch};
pub use types::{Item, Tag};
