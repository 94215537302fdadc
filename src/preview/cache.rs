use super::types::PreviewData;
use anyhow::Result;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

const DEFAULT_TTL_SECONDS: u64 = 300; // 5 minutes

/// Cached preview entry with its fetch timestamp
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct CachedPreview {
    pub data: PreviewData,
    pub fetched_at: u64, // Unix timestamp
}

/// Disk-persistent TTL cache for preview metadata, keyed by product URL.
///
/// An explicit component rather than a hidden global map: the TTL is owned
/// here and callers only see `get`/`set`/`is_expired`.
pub struct PreviewCache {
    cache_path: PathBuf,
    ttl_seconds: u64,
}

/// Get the platform-appropriate preview cache directory
pub fn get_cache_path() -> PathBuf {
    dirs::cache_dir()
        .map(|p| p.join("pickwise/preview-cache"))
        .unwrap_or_else(|| {
            PathBuf::from(format!(
                "{}/.cache/pickwise/preview-cache",
                std::env::var("HOME").unwrap_or_default()
            ))
        })
}

impl PreviewCache {
    pub fn new(cache_path: PathBuf) -> Self {
        Self::with_ttl(cache_path, DEFAULT_TTL_SECONDS)
    }

    pub fn with_ttl(cache_path: PathBuf, ttl_seconds: u64) -> Self {
        Self {
            cache_path,
            ttl_seconds,
        }
    }

    /// Read a fresh entry for a URL. Expired entries are evicted and report
    /// as a miss.
    pub fn get(&self, url: &str) -> Option<PreviewData> {
        let bytes = cacache::read_sync(&self.cache_path, Self::key(url)).ok()?;
        let entry: CachedPreview = serde_json::from_slice(&bytes).ok()?;

        if self.is_expired(&entry) {
            let _ = cacache::remove_sync(&self.cache_path, &Self::key(url));
            return None;
        }

        Some(entry.data)
    }

    /// Store a preview entry with the current timestamp
    pub fn set(&self, url: &str, data: &PreviewData) -> Result<()> {
        let entry = CachedPreview {
            data: data.clone(),
            fetched_at: unix_now(),
        };
        let json = serde_json::to_vec(&entry)?;
        cacache::write_sync(&self.cache_path, Self::key(url), &json)?;
        Ok(())
    }

    /// Check whether an entry has outlived the cache's TTL
    pub fn is_expired(&self, entry: &CachedPreview) -> bool {
        unix_now().saturating_sub(entry.fetched_at) >= self.ttl_seconds
    }

    /// Remove the whole cache directory
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_dir_all(&self.cache_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn key(url: &str) -> String {
        format!("preview:{}", url)
    }
}

/// Clear the preview cache at its default location
pub fn clear_cache() -> Result<()> {
    PreviewCache::new(get_cache_path()).clear()
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn temp_cache(name: &str, ttl_seconds: u64) -> PreviewCache {
        let dir = env::temp_dir().join(format!("pickwise_preview_cache_{}", name));
        let _ = std::fs::remove_dir_all(&dir);
        PreviewCache::with_ttl(dir, ttl_seconds)
    }

    fn sample_preview() -> PreviewData {
        PreviewData {
            title: "Kettle".to_string(),
            description: "Boils water".to_string(),
            image: "https://shop.example/kettle.jpg".to_string(),
            url: "https://shop.example/kettle".to_string(),
        }
    }

    #[test]
    fn test_miss_on_empty_cache() {
        let cache = temp_cache("miss", 300);
        assert!(cache.get("https://shop.example/kettle").is_none());
    }

    #[test]
    fn test_set_then_get() {
        let cache = temp_cache("hit", 300);
        let data = sample_preview();
        cache.set(&data.url, &data).unwrap();
        assert_eq!(cache.get(&data.url), Some(data));
        let _ = cache.clear();
    }

    #[test]
    fn test_expired_entry_is_a_miss() {
        // TTL of zero: every entry is expired the moment it is written
        let cache = temp_cache("expired", 0);
        let data = sample_preview();
        cache.set(&data.url, &data).unwrap();
        assert!(cache.get(&data.url).is_none());
        let _ = cache.clear();
    }

    #[test]
    fn test_is_expired_boundary() {
        let cache = temp_cache("boundary", 300);
        let fresh = CachedPreview {
            data: sample_preview(),
            fetched_at: unix_now(),
        };
        let stale = CachedPreview {
            data: sample_preview(),
            fetched_at: unix_now().saturating_sub(301),
        };
        assert!(!cache.is_expired(&fresh));
        assert!(cache.is_expired(&stale));
    }

    #[test]
    fn test_clear_missing_dir_ok() {
        let cache = temp_cache("clear", 300);
        assert!(cache.clear().is_ok());
    }
}
