use super::weights::RatingWeights;
use crate::item::types::Item;

/// How a single item's rating was assembled, for display in detail views.
#[derive(Debug, Clone)]
pub struct RatingBreakdown {
    pub base_rating: f64,     // pros/cons balance alone, centered at 50
    pub price_impact: f64,    // 0..=price_rating_weight, cheaper is larger
    pub pros_cons_impact: f64, // relative standing against the collection
    pub rating: f64,          // clamped to [0, 100], one decimal
}

/// Calculate an item's rating against a snapshot of its collection.
///
/// Pure and infallible: every numeric edge case (empty snapshot, zero maxima,
/// equal prices) substitutes a neutral default instead of erroring. The
/// returned item is a copy with only `rating` rewritten.
pub fn calculate_rating(item: &Item, all_items: &[Item], weights: &RatingWeights) -> Item {
    let breakdown = rating_breakdown(item, all_items, weights);
    let mut rated = item.clone();
    rated.rating = breakdown.rating;
    rated
}

/// Recalculate every rating in a collection from one consistent snapshot.
///
/// Normalization statistics (min/max price, avg/max pros and cons sums) are
/// taken from the input list as-is; previously written ratings never feed
/// back into the pass.
pub fn recalculate_all_ratings(all_items: &[Item], weights: &RatingWeights) -> Vec<Item> {
    all_items
        .iter()
        .map(|item| calculate_rating(item, all_items, weights))
        .collect()
}

/// Compute the full breakdown behind [`calculate_rating`].
pub fn rating_breakdown(
    item: &Item,
    all_items: &[Item],
    weights: &RatingWeights,
) -> RatingBreakdown {
    let pros_score = item.pros_score();
    let cons_score = item.cons_score();

    // Base rating: pros/cons balance scaled into [0, 100], centered at 50.
    // An item with no tags sits exactly at 50.
    let tag_count = item.pros.len() + item.cons.len();
    let max_possible_score = ((tag_count * 10) as f64).max(1.0);
    let base_rating = (pros_score - cons_score) / max_possible_score * 50.0 + 50.0;

    // Price impact: position within the collection's price range, scaled by
    // the price weight. Cheapest gets the full weight, priciest gets zero.
    // All-equal prices contribute nothing.
    let mut price_impact = 0.0;
    if !all_items.is_empty() && item.price > 0.0 {
        let max_price = all_items
            .iter()
            .map(|i| i.price)
            .fold(f64::NEG_INFINITY, f64::max);
        let min_price = all_items
            .iter()
            .map(|i| i.price)
            .fold(f64::INFINITY, f64::min);
        if max_price > min_price {
            let price_ratio = (max_price - item.price) / (max_price - min_price);
            price_impact = price_ratio * weights.price_rating_weight;
        }
    }

    // Relative pros/cons impact: how this item's tag sums stand against the
    // collection's best and average, with both bonuses clamped to [0.5, 1.5].
    let mut pros_cons_impact = 0.0;
    if !all_items.is_empty() {
        let count = all_items.len() as f64;
        let avg_pros_score = all_items.iter().map(Item::pros_score).sum::<f64>() / count;
        let avg_cons_score = all_items.iter().map(Item::cons_score).sum::<f64>() / count;
        let max_pros_score = all_items
            .iter()
            .map(Item::pros_score)
            .fold(f64::NEG_INFINITY, f64::max);
        let max_cons_score = all_items
            .iter()
            .map(Item::cons_score)
            .fold(f64::NEG_INFINITY, f64::max);

        let normalized_pros = if max_pros_score > 0.0 {
            pros_score / max_pros_score
        } else {
            0.0
        };
        let normalized_cons = if max_cons_score > 0.0 {
            cons_score / max_cons_score
        } else {
            0.0
        };

        let pros_vs_avg = if avg_pros_score > 0.0 {
            pros_score / avg_pros_score
        } else {
            1.0
        };
        let pros_bonus = pros_vs_avg.clamp(0.5, 1.5);

        let cons_vs_avg = if avg_cons_score > 0.0 {
            cons_score / avg_cons_score
        } else {
            0.0
        };
        let cons_bonus = (1.0 - cons_vs_avg).clamp(0.5, 1.5);

        pros_cons_impact = (normalized_pros * pros_bonus - normalized_cons * cons_bonus)
            * weights.pros_cons_rating_weight
            * 0.15;
    }

    let rating = round_one_decimal((base_rating + price_impact + pros_cons_impact).clamp(0.0, 100.0));

    RatingBreakdown {
        base_rating,
        price_impact,
        pros_cons_impact,
        rating,
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
