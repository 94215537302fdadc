use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single pro or con entry: free text plus a 1-10 impact weight.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tag {
    pub text: String,
    #[serde(default = "Tag::default_impact")]
    pub impact: i64,
}

impl Tag {
    /// Impact used when none is specified
    pub const DEFAULT_IMPACT: i64 = 5;

    fn default_impact() -> i64 {
        Self::DEFAULT_IMPACT
    }

    /// Parse a CLI tag spec of the form "text" or "text:impact".
    ///
    /// A trailing `:N` with N in 1..=10 sets the impact; anything else is part
    /// of the text. "quiet fan:8" -> impact 8, "usb-c:90w charging" -> impact 5.
    pub fn parse_spec(spec: &str) -> Result<Self> {
        let spec = spec.trim();
        if spec.is_empty() {
            anyhow::bail!("Tag text cannot be empty");
        }

        if let Some((text, impact_str)) = spec.rsplit_once(':') {
            if let Ok(impact) = impact_str.trim().parse::<i64>() {
                if !(1..=10).contains(&impact) {
                    anyhow::bail!("Tag impact must be between 1 and 10, got {}", impact);
                }
                let text = text.trim();
                if text.is_empty() {
                    anyhow::bail!("Tag text cannot be empty");
                }
                return Ok(Self {
                    text: text.to_string(),
                    impact,
                });
            }
        }

        Ok(Self {
            text: spec.to_string(),
            impact: Self::DEFAULT_IMPACT,
        })
    }
}

/// A compared item: one product/option within a collection.
///
/// `id` and `created_date` are assigned at creation and never change.
/// `rating` is derived: the engine rewrites it on every mutation and it is
/// never edited by hand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub pros: Vec<Tag>,
    #[serde(default)]
    pub cons: Vec<Tag>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default = "Utc::now")]
    pub created_date: DateTime<Utc>,
}

impl Item {
    /// Sum of pro impacts
    pub fn pros_score(&self) -> f64 {
        self.pros.iter().map(|tag| tag.impact).sum::<i64>() as f64
    }

    /// Sum of con impacts
    pub fn cons_score(&self) -> f64 {
        self.cons.iter().map(|tag| tag.impact).sum::<i64>() as f64
    }

    /// Time since the item was added to its collection
    pub fn age(&self) -> chrono::Duration {
        Utc::now() - self.created_date
    }

    /// Display name, falling back to the URL for untitled items
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            if self.url.is_empty() {
                "(untitled)"
            } else {
                &self.url
            }
        } else {
            &self.title
        }
    }
}

/// Parse a price argument like "19.99"
pub fn parse_price(value: &str) -> Result<f64> {
    let price: f64 = value
        .trim()
        .parse()
        .with_context(|| format!("Invalid price: '{}'", value))?;
    if price < 0.0 {
        anyhow::bail!("Price cannot be negative: {}", price);
    }
    Ok(price)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_impact_defaults_to_five() {
        let json = r#"{"text": "light"}"#;
        let tag: Tag = serde_json::from_str(json).unwrap();
        assert_eq!(tag.impact, 5);
    }

    #[test]
    fn test_tag_parse_spec_with_impact() {
        let tag = Tag::parse_spec("quiet fan:8").unwrap();
        assert_eq!(tag.text, "quiet fan");
        assert_eq!(tag.impact, 8);
    }

    #[test]
    fn test_tag_parse_spec_without_impact() {
        let tag = Tag::parse_spec("great battery life").unwrap();
        assert_eq!(tag.text, "great battery life");
        assert_eq!(tag.impact, Tag::DEFAULT_IMPACT);
    }

    #[test]
    fn test_tag_parse_spec_colon_in_text() {
        // Trailing part is not a number, so the colon belongs to the text
        let tag = Tag::parse_spec("usb-c: fast charging").unwrap();
        assert_eq!(tag.text, "usb-c: fast charging");
        assert_eq!(tag.impact, Tag::DEFAULT_IMPACT);
    }

    #[test]
    fn test_tag_parse_spec_rejects_out_of_range_impact() {
        assert!(Tag::parse_spec("too strong:11").is_err());
        assert!(Tag::parse_spec("too weak:0").is_err());
    }

    #[test]
    fn test_tag_parse_spec_rejects_empty() {
        assert!(Tag::parse_spec("").is_err());
        assert!(Tag::parse_spec("  ").is_err());
        assert!(Tag::parse_spec(":7").is_err());
    }

    #[test]
    fn test_item_scores_sum_impacts() {
        let item = Item {
            id: "x".to_string(),
            url: String::new(),
            title: String::new(),
            description: String::new(),
            images: vec![],
            price: 0.0,
            currency: String::new(),
            pros: vec![
                Tag { text: "a".to_string(), impact: 7 },
                Tag { text: "b".to_string(), impact: 2 },
            ],
            cons: vec![Tag { text: "c".to_string(), impact: 4 }],
            rating: 0.0,
            created_date: Utc::now(),
        };
        assert_eq!(item.pros_score(), 9.0);
        assert_eq!(item.cons_score(), 4.0);
    }

    #[test]
    fn test_item_deserializes_with_missing_fields() {
        // Imported payloads may carry only partial records
        let json = r#"{"title": "Old kettle", "price": 12.5}"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert!(item.id.is_empty());
        assert_eq!(item.price, 12.5);
        assert!(item.pros.is_empty());
        assert_eq!(item.rating, 0.0);
    }

    #[test]
    fn test_display_title_fallbacks() {
        let mut item: Item = serde_json::from_str("{}").unwrap();
        assert_eq!(item.display_title(), "(untitled)");
        item.url = "https://shop.example/a".to_string();
        assert_eq!(item.display_title(), "https://shop.example/a");
        item.title = "Kettle".to_string();
        assert_eq!(item.display_title(), "Kettle");
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("19.99").unwrap(), 19.99);
        assert!(parse_price("-1").is_err());
        assert!(parse_price("abc").is_err());
    }
}
