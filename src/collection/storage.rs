use super::types::Collection;
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Lightweight listing entry for `pickwise collections`
#[derive(Debug, Clone)]
pub struct CollectionSummary {
    pub path: PathBuf,
    pub id: String,
    pub name: String,
    pub item_count: usize,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Directory holding collection files (~/.config/pickwise/collections/)
pub fn get_collections_dir() -> PathBuf {
    crate::config::get_config_dir().join("collections")
}

/// Path of a collection file by collection id
pub fn collection_path(id: &str) -> PathBuf {
    get_collections_dir().join(format!("{}.json", id))
}

/// Load a collection from a JSON file
///
/// Missing files are an error here: callers that want create-if-absent go
/// through `Collection::new` explicitly. Unsupported versions are rejected.
pub fn load_collection(path: &Path) -> Result<Collection> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open collection file at {}", path.display()))?;

    let collection: Collection =
        serde_json::from_reader(file).context("Failed to load collection")?;

    if collection.version != 1 {
        anyhow::bail!("Unsupported collection version: {}", collection.version);
    }

    Ok(collection)
}

/// Save a collection to a JSON file atomically
///
/// Uses atomic-write-file so a crash mid-write never leaves a corrupted
/// collection behind. Creates the parent directory if needed.
pub fn save_collection(path: &Path, collection: &Collection) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory at {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, collection)
        .context("Failed to serialize collection")?;

    file.commit().context("Failed to save collection")?;

    Ok(())
}

/// List every collection in a directory, most recently updated first.
///
/// Unreadable files are skipped; a missing directory is just an empty list.
pub fn list_collections(dir: &Path) -> Result<Vec<CollectionSummary>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let pattern = dir.join("*.json");
    let pattern = pattern
        .to_str()
        .context("Collection directory path is not valid UTF-8")?;

    let mut summaries = Vec::new();
    for entry in glob::glob(pattern).context("Failed to scan collection directory")? {
        let path = match entry {
            Ok(p) => p,
            Err(_) => continue,
        };
        let Ok(collection) = load_collection(&path) else {
            continue;
        };
        summaries.push(CollectionSummary {
            path,
            id: collection.id,
            name: collection.name,
            item_count: collection.items.len(),
            updated_at: collection.updated_at,
        });
    }

    summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    Ok(summaries)
}
