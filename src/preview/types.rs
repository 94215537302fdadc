use serde::{Deserialize, Serialize};

/// Preview metadata for a pasted product link, as returned by the preview
/// service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PreviewData {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub url: String,
}

impl PreviewData {
    /// Stub record used when the preview service is unreachable: an add must
    /// still succeed with whatever the user typed.
    pub fn placeholder(url: &str) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            image: String::new(),
            url: url.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_partial_payload() {
        let json = r#"{"title": "Kettle", "url": "https://shop.example/kettle"}"#;
        let data: PreviewData = serde_json::from_str(json).unwrap();
        assert_eq!(data.title, "Kettle");
        assert!(data.description.is_empty());
        assert!(data.image.is_empty());
    }

    #[test]
    fn test_placeholder_keeps_url() {
        let data = PreviewData::placeholder("https://shop.example/kettle");
        assert_eq!(data.url, "https://shop.example/kettle");
        assert!(data.title.is_empty());
    }
}
