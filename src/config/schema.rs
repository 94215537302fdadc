use crate::rating::RatingWeights;
use serde::{Deserialize, Serialize};

/// Application configuration.
///
/// Example YAML:
/// ```yaml
/// preview_url: "https://pickwise.example/backend"
/// autosave_delay_ms: 1000
/// weights:
///   price_rating_weight: 20
///   pros_cons_rating_weight: 80
/// ```
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Base URL of the preview-metadata service. Unset disables preview
    /// fetching; `add` then records only what the user typed.
    #[serde(default)]
    pub preview_url: Option<String>,

    /// Default weights for newly created collections
    #[serde(default)]
    pub weights: Option<RatingWeights>,

    /// Quiet period before a mutated collection is autosaved
    #[serde(default)]
    pub autosave_delay_ms: Option<u64>,
}

impl Config {
    /// Weights to seed a new collection with
    pub fn default_weights(&self) -> RatingWeights {
        self.weights.unwrap_or_default()
    }

    /// Autosave debounce delay
    pub fn autosave_delay(&self) -> std::time::Duration {
        self.autosave_delay_ms
            .map(std::time::Duration::from_millis)
            .unwrap_or(crate::saver::DebouncedSaver::DEFAULT_DELAY)
    }
}
