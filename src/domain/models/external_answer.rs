use serde::{Deserialize, Serialize};

use crate::domain::extract_urls;

/// Free-text answer from the external model plus the URLs found in it.
///
/// The empty value means "no usable answer" and is ordinary control flow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalAnswer {
    pub text: String,
    pub links: Vec<String>,
}

impl ExternalAnswer {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Trims the text and scans it for links, keeping order and duplicates.
    pub fn from_text(text: &str) -> Self {
        let text = text.trim().to_string();
        let links = extract_urls(&text);
        Self { text, links }
    }

    pub fn new(text: impl Into<String>, links: Vec<String>) -> Self {
        Self {
            text: text.into(),
            links,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn links(&self) -> &[String] {
        &self.links
    }

    pub fn has_text(&self) -> bool {
        !self.text.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.links.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_collects_links_in_order() {
        let answer = ExternalAnswer::from_text(
            "  Answer: try https://a.example/x then https://b.example/y or https://a.example/x\n",
        );

        assert_eq!(
            answer.text(),
            "Answer: try https://a.example/x then https://b.example/y or https://a.example/x"
        );
        assert_eq!(
            answer.links(),
            &[
                "https://a.example/x".to_string(),
                "https://b.example/y".to_string(),
                "https://a.example/x".to_string(),
            ]
        );
    }

    #[test]
    fn test_empty() {
        assert!(ExternalAnswer::empty().is_empty());
        assert!(ExternalAnswer::from_text("   ").is_empty());
    }
}
