use std::io::IsTerminal;

use owo_colors::OwoColorize;
use terminal_size::{terminal_size, Width};

use crate::item::types::Item;
use crate::rating::RatingBreakdown;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a rating with one decimal, e.g. "72.5"
pub fn format_rating(rating: f64) -> String {
    format!("{:.1}", rating)
}

/// Format a price with its currency, or "-" when no price is set
fn format_price(item: &Item) -> String {
    if item.price <= 0.0 {
        return "-".to_string();
    }
    if item.currency.is_empty() {
        format!("{:.2}", item.price)
    } else {
        format!("{:.2} {}", item.price, item.currency)
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a title to fit available width, accounting for Unicode
fn truncate_title(title: &str, max_width: usize) -> String {
    let chars: Vec<char> = title.chars().collect();
    if chars.len() <= max_width {
        title.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format items as a rated table with columns: Index, Rating, Title, Price.
/// Index column: 3 chars, right-aligned. Rating column: 5 chars (fits "100.0").
pub fn format_rated_table(items: &[Item], use_colors: bool) -> String {
    if items.is_empty() {
        return "No items in this collection.".to_string();
    }

    let term_width = get_terminal_width();
    let rating_width = 5;
    let separator = "  ";

    items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            let index_str = format!("{:>2}.", idx + 1);
            let rating_str =
                format!("{:>width$}", format_rating(item.rating), width = rating_width);
            let price_str = format_price(item);

            let fixed_width = 3 + 1 + rating_width + separator.len() * 2 + price_str.len();
            let title = if let Some(width) = term_width {
                if width > fixed_width + 10 {
                    truncate_title(item.display_title(), width - fixed_width)
                } else {
                    // Very narrow terminal, show truncated
                    truncate_title(item.display_title(), 20)
                }
            } else {
                // No terminal (pipe), don't truncate
                item.display_title().to_string()
            };

            if use_colors {
                format!(
                    "{} {}{}{}{}{}",
                    index_str.dimmed(),
                    rating_str.bold(),
                    separator,
                    title,
                    separator,
                    price_str.cyan()
                )
            } else {
                format!(
                    "{} {}{}{}{}{}",
                    index_str, rating_str, separator, title, separator, price_str
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a single item with its pros/cons and the rating breakdown
/// (used by verbose listing and after edits)
pub fn format_item_detail(item: &Item, breakdown: &RatingBreakdown, use_colors: bool) -> String {
    let mut lines = Vec::new();

    if use_colors {
        lines.push(item.display_title().bold().to_string());
    } else {
        lines.push(item.display_title().to_string());
    }

    if !item.url.is_empty() && item.display_title() != item.url {
        if use_colors {
            lines.push(format!("  URL: {}", item.url.underline()));
        } else {
            lines.push(format!("  URL: {}", item.url));
        }
    }
    if !item.description.is_empty() {
        lines.push(format!("  {}", item.description));
    }
    lines.push(format!("  Price: {}", format_price(item)));

    for tag in &item.pros {
        let line = format!("  + {} ({})", tag.text, tag.impact);
        if use_colors {
            lines.push(line.green().to_string());
        } else {
            lines.push(line);
        }
    }
    for tag in &item.cons {
        let line = format!("  - {} ({})", tag.text, tag.impact);
        if use_colors {
            lines.push(line.red().to_string());
        } else {
            lines.push(line);
        }
    }

    lines.push(format!(
        "  Rating: {} (base {:.1}, price {:+.1}, pros/cons {:+.1})",
        format_rating(breakdown.rating),
        breakdown.base_rating,
        breakdown.price_impact,
        breakdown.pros_cons_impact
    ));

    lines.join("\n")
}
