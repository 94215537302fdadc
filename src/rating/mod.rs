pub mod engine;
pub mod validation;
pub mod weights;

pub use engine::{calculate_rating, rating_breakdown, recalculate_all_ratings, RatingBreakdown};
pub use validation::validate_weights;
pub use weights::RatingWeights;
