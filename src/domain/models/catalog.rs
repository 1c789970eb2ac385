use std::collections::HashMap;

use super::{CatalogRow, Document};

/// The ordered, immutable set of documents loaded at startup.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    documents: Vec<Document>,
}

impl Catalog {
    /// Normalizes rows and backfills empty service names.
    ///
    /// Backfill runs in two phases: the first records, per `portal_url` and per
    /// `service_number`, the first non-empty service name in catalog order; the
    /// second fills every empty service from its portal group, then from its
    /// service-number group. Fills never feed other fills.
    pub fn from_rows(rows: &[CatalogRow]) -> Self {
        let mut documents: Vec<Document> = rows.iter().map(Document::from_row).collect();

        let by_portal = first_service_by(&documents, |d| d.portal_url.as_str());
        let by_number = first_service_by(&documents, |d| d.service_number.as_str());

        for doc in documents.iter_mut().filter(|d| d.service.is_empty()) {
            let fill = by_portal
                .get(doc.portal_url.as_str())
                .or_else(|| by_number.get(doc.service_number.as_str()));
            if let Some(service) = fill {
                doc.service = service.clone();
            }
        }

        Self { documents }
    }

    pub fn from_documents(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn into_documents(self) -> Vec<Document> {
        self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

fn first_service_by(
    documents: &[Document],
    key: impl Fn(&Document) -> &str,
) -> HashMap<String, String> {
    let mut groups: HashMap<String, String> = HashMap::new();
    for doc in documents {
        let k = key(doc);
        if k.is_empty() || doc.service.is_empty() {
            continue;
        }
        groups
            .entry(k.to_string())
            .or_insert_with(|| doc.service.clone());
    }
    groups
}
