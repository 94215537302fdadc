pub mod formatter;

pub use formatter::{format_item_detail, format_rated_table, format_rating, should_use_colors};
