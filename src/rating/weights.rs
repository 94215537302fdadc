use serde::{Deserialize, Serialize};

/// Rating weight configuration.
///
/// Both weights are percentage points on the 0-100 rating scale. They are
/// independent knobs; there is no sum-to-100 requirement. `price_rating_weight`
/// caps how much being the cheapest item in a collection can add, and
/// `pros_cons_rating_weight` scales the cross-item pros/cons adjustment.
///
/// Example YAML:
/// ```yaml
/// weights:
///   price_rating_weight: 20
///   pros_cons_rating_weight: 80
/// ```
// No deny_unknown_fields: this struct is flattened into Collection, so it
// must tolerate sibling keys during deserialization.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq)]
pub struct RatingWeights {
    /// How strongly a low price lifts the rating (default: 20.0)
    pub price_rating_weight: f64,

    /// How strongly relative pros/cons shift the rating (default: 80.0)
    pub pros_cons_rating_weight: f64,
}

impl Default for RatingWeights {
    fn default() -> Self {
        Self {
            price_rating_weight: 20.0,
            pros_cons_rating_weight: 80.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let weights = RatingWeights::default();
        assert_eq!(weights.price_rating_weight, 20.0);
        assert_eq!(weights.pros_cons_rating_weight, 80.0);
    }

    #[test]
    fn test_weights_serde_roundtrip() {
        let weights = RatingWeights::default();
        let yaml = serde_saphyr::to_string(&weights).unwrap();
        let parsed: RatingWeights = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(weights, parsed);
    }

    #[test]
    fn test_weights_parse_from_yaml() {
        let yaml = r#"
price_rating_weight: 35
pros_cons_rating_weight: 65
"#;
        let weights: RatingWeights = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(weights.price_rating_weight, 35.0);
        assert_eq!(weights.pros_cons_rating_weight, 65.0);
    }
}
