use super::weights::RatingWeights;

/// Check rating weights at startup and collect advisory warnings.
///
/// Out-of-range weights are never rejected: the engine accepts them and still
/// produces a clamped [0, 100] rating, so every finding here is a warning for
/// the user, not an error. All findings are returned at once.
pub fn validate_weights(weights: &RatingWeights) -> Vec<String> {
    let mut warnings = Vec::new();

    if weights.price_rating_weight < 0.0 {
        warnings.push(format!(
            "weights.price_rating_weight: {} is negative; cheap items will be penalized",
            weights.price_rating_weight
        ));
    }
    if weights.pros_cons_rating_weight < 0.0 {
        warnings.push(format!(
            "weights.pros_cons_rating_weight: {} is negative; pros will lower ratings",
            weights.pros_cons_rating_weight
        ));
    }
    if weights.price_rating_weight > 100.0 {
        warnings.push(format!(
            "weights.price_rating_weight: {} exceeds 100; price alone can saturate ratings",
            weights.price_rating_weight
        ));
    }
    if weights.pros_cons_rating_weight > 100.0 {
        warnings.push(format!(
            "weights.pros_cons_rating_weight: {} exceeds 100; pros/cons can saturate ratings",
            weights.pros_cons_rating_weight
        ));
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_clean() {
        assert!(validate_weights(&RatingWeights::default()).is_empty());
    }

    #[test]
    fn test_negative_price_weight_warns() {
        let weights = RatingWeights {
            price_rating_weight: -5.0,
            pros_cons_rating_weight: 80.0,
        };
        let warnings = validate_weights(&weights);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("price_rating_weight"));
    }

    #[test]
    fn test_oversized_weight_warns() {
        let weights = RatingWeights {
            price_rating_weight: 20.0,
            pros_cons_rating_weight: 150.0,
        };
        let warnings = validate_weights(&weights);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("exceeds 100"));
    }

    #[test]
    fn test_collects_all_warnings() {
        let weights = RatingWeights {
            price_rating_weight: -1.0,
            pros_cons_rating_weight: 101.0,
        };
        assert_eq!(validate_weights(&weights).len(), 2);
    }
}
