pub mod cache;
pub mod client;
pub mod types;

pub use cache::PreviewCache;
pub use client::PreviewClient;
pub use types::PreviewData;

use anyhow::Result;

/// Fetch preview metadata for a URL, going through the cache first.
///
/// Fresh cache entries are returned directly; otherwise the client is asked
/// and the answer is written back. Cache write failures are ignored: a cache
/// problem must never break an add.
pub async fn cached_fetch(
    client: &PreviewClient,
    cache: &PreviewCache,
    url: &str,
) -> Result<PreviewData> {
    if let Some(data) = cache.get(url) {
        return Ok(data);
    }

    let data = client.fetch(url).await?;
    let _ = cache.set(url, &data);
    Ok(data)
}
