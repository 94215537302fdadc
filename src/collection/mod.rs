pub mod storage;
pub mod types;

pub use storage::{
    collection_path, list_collections, load_collection, save_collection, CollectionSummary,
};
pub use types::Collection;
