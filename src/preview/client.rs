use super::types::PreviewData;
use anyhow::{Context, Result};
use std::time::Duration;
use tokio_retry::strategy::{jitter, ExponentialBackoff};
use tokio_retry::Retry;

/// Client of the external preview-metadata service.
///
/// The service fetches the remote page server-side and answers with a small
/// JSON record (title, description, image, url). This client owns only the
/// HTTP glue: retries on flaky responses and a placeholder fallback so an
/// add never fails on preview trouble.
pub struct PreviewClient {
    http: reqwest::Client,
    base_url: String,
}

impl PreviewClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent("pickwise")
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch preview metadata for a product URL, retrying twice with
    /// exponential backoff.
    pub async fn fetch(&self, url: &str) -> Result<PreviewData> {
        let strategy = ExponentialBackoff::from_millis(200).map(jitter).take(2);

        Retry::spawn(strategy, || self.fetch_once(url))
            .await
            .with_context(|| format!("Failed to fetch preview for {}", url))
    }

    /// Fetch preview metadata, degrading to a stub record on any failure.
    pub async fn fetch_or_placeholder(&self, url: &str) -> PreviewData {
        match self.fetch(url).await {
            Ok(data) => data,
            Err(e) => {
                eprintln!("Preview fetch failed for {}: {}", url, e);
                PreviewData::placeholder(url)
            }
        }
    }

    async fn fetch_once(&self, url: &str) -> Result<PreviewData> {
        let response = self
            .http
            .get(format!("{}/preview", self.base_url))
            .query(&[("url", url)])
            .send()
            .await
            .context("Preview request failed")?
            .error_for_status()
            .context("Preview service returned an error status")?;

        let data: PreviewData = response
            .json()
            .await
            .context("Failed to parse preview JSON")?;

        Ok(data)
    }
}
