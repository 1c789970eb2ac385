use crate::domain::{extract_urls, Document, ExternalAnswer, LinkPolicy};

/// Picks the single link that represents an external answer.
///
/// Declared links are tried first, in order; only when none is allowed is the
/// answer text re-scanned for URLs. Returns an empty string when nothing
/// passes the policy.
pub fn choose_best_link(answer: &ExternalAnswer, policy: &LinkPolicy) -> String {
    if let Some(link) = answer.links().iter().find(|u| policy.allows(u)) {
        return link.clone();
    }

    extract_urls(answer.text())
        .into_iter()
        .find(|u| policy.allows(u))
        .unwrap_or_default()
}

/// Maps a URL back onto a catalog document.
///
/// Three passes in decreasing specificity, each returning the first match in
/// catalog order: exact request url, exact portal url, then a url that starts
/// with a document's portal url (the model linked somewhere under the portal).
pub fn find_document_by_link<'a>(url: &str, documents: &'a [Document]) -> Option<&'a Document> {
    if url.is_empty() {
        return None;
    }

    documents
        .iter()
        .find(|d| d.url() == url)
        .or_else(|| documents.iter().find(|d| d.portal_url() == url))
        .or_else(|| {
            documents
                .iter()
                .find(|d| !d.portal_url().is_empty() && url.starts_with(d.portal_url()))
        })
}
