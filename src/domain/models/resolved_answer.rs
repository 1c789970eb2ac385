use serde::{Deserialize, Serialize};

use super::Document;

/// Title used for a card that points at a link the catalog does not know.
pub const UNMAPPED_LINK_TITLE: &str = "Open the recommended link";

/// Which path produced the resolved answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AnswerSource {
    External,
    Local,
    #[default]
    None,
}

impl AnswerSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerSource::External => "external",
            AnswerSource::Local => "local",
            AnswerSource::None => "none",
        }
    }
}

impl std::fmt::Display for AnswerSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of reconciling the external answer with the catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedAnswer {
    pub document: Option<Document>,
    pub request_title: String,
    pub request_url: String,
    pub portal_url: String,
    /// Link chosen from the external answer; empty when it offered none.
    pub primary_link: String,
    pub alternates: Vec<Document>,
    pub source: AnswerSource,
    /// Raw text returned by the external model, empty on the local path.
    pub model_text: String,
}

impl ResolvedAnswer {
    pub fn from_document(document: &Document, source: AnswerSource) -> Self {
        Self {
            document: Some(document.clone()),
            request_title: document.title().trim().to_string(),
            request_url: document.url().trim().to_string(),
            portal_url: document.portal_url().trim().to_string(),
            source,
            ..Default::default()
        }
    }

    /// Minimal card for a link that did not map onto any document.
    pub fn unmapped_link(link: &str) -> Self {
        Self {
            request_title: UNMAPPED_LINK_TITLE.to_string(),
            request_url: link.to_string(),
            primary_link: link.to_string(),
            source: AnswerSource::External,
            ..Default::default()
        }
    }

    pub fn unresolved() -> Self {
        Self::default()
    }

    pub fn with_primary_link(mut self, link: impl Into<String>) -> Self {
        self.primary_link = link.into();
        self
    }

    pub fn with_model_text(mut self, text: impl Into<String>) -> Self {
        self.model_text = text.into();
        self
    }

    pub fn with_alternates(mut self, alternates: Vec<Document>) -> Self {
        self.alternates = alternates;
        self
    }

    /// Whether the external path contributed text or a link. Decides the
    /// rendering template independently of where the document came from.
    pub fn is_model_backed(&self) -> bool {
        !self.model_text.is_empty() || !self.primary_link.is_empty()
    }

    pub fn is_resolved(&self) -> bool {
        self.document.is_some()
    }
}
