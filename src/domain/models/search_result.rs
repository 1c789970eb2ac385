use super::Document;

/// One scored hit from the catalog index, borrowing the indexed document.
#[derive(Debug, Clone, Copy)]
pub struct SearchResult<'a> {
    document: &'a Document,
    position: usize,
    score: f32,
}

impl<'a> SearchResult<'a> {
    pub fn new(document: &'a Document, position: usize, score: f32) -> Self {
        Self {
            document,
            position,
            score,
        }
    }

    pub fn document(&self) -> &'a Document {
        self.document
    }

    /// Row of the document in catalog order.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn score(&self) -> f32 {
        self.score
    }

    pub fn display_line(&self) -> String {
        format!(
            "{} <{}> (score: {:.3})",
            self.document.title(),
            self.document.url(),
            self.score
        )
    }
}
