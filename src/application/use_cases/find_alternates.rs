use crate::domain::{Document, LinkPolicy};

pub const DEFAULT_ALTERNATES_LIMIT: usize = 3;

/// Collects up to `limit` other documents on the same portal as `document`.
///
/// Portal urls are compared as plain strings. Candidates need a title and an
/// allowed url. `document` is excluded by identity, so it must be borrowed
/// from `documents`.
pub fn find_alternates(
    document: Option<&Document>,
    documents: &[Document],
    policy: &LinkPolicy,
    limit: usize,
) -> Vec<Document> {
    let Some(document) = document else {
        return Vec::new();
    };
    let portal_url = document.portal_url().trim();
    if portal_url.is_empty() || limit == 0 {
        return Vec::new();
    }

    let mut alternates = Vec::new();
    for candidate in documents {
        if alternates.len() >= limit {
            break;
        }
        if std::ptr::eq(candidate, document) || candidate.portal_url().trim() != portal_url {
            continue;
        }

        let title = candidate.title().trim();
        let url = candidate.url().trim();
        if !title.is_empty() && !url.is_empty() && policy.allows(url) {
            alternates.push(candidate.clone());
        }
    }

    alternates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn documents() -> Vec<Document> {
        vec![
            Document::new("Reset Password", "https://portal/5/reset", "https://portal/5"),
            Document::new("VPN", "https://portal/5/vpn", "https://portal/5"),
            Document::new("No Url", "", "https://portal/5"),
            Document::new("Laptop", "https://portal/9/laptop", "https://portal/9"),
            Document::new("Email", "https://portal/5/email", "https://portal/5"),
            Document::new("Offsite", "https://other/5/x", "https://portal/5"),
            Document::new("Badge", "https://portal/5/badge", "https://portal/5"),
        ]
    }

    #[test]
    fn test_siblings_in_catalog_order() {
        let docs = documents();
        let alternates = find_alternates(Some(&docs[0]), &docs, &LinkPolicy::allow_all(), 10);

        let titles: Vec<&str> = alternates.iter().map(|d| d.title()).collect();
        assert_eq!(titles, vec!["VPN", "Email", "Offsite", "Badge"]);
    }

    #[test]
    fn test_limit_and_policy() {
        let docs = documents();
        let policy = LinkPolicy::new(vec!["https://portal/".to_string()]);
        let alternates = find_alternates(Some(&docs[0]), &docs, &policy, 2);

        let titles: Vec<&str> = alternates.iter().map(|d| d.title()).collect();
        assert_eq!(titles, vec!["VPN", "Email"]);
    }

    #[test]
    fn test_none_or_portalless_document() {
        let docs = documents();
        assert!(find_alternates(None, &docs, &LinkPolicy::allow_all(), 3).is_empty());

        let lonely = vec![Document::new("Alone", "https://x/1", "")];
        assert!(find_alternates(Some(&lonely[0]), &lonely, &LinkPolicy::allow_all(), 3).is_empty());
    }

    #[test]
    fn test_no_siblings() {
        let docs = vec![Document::new("Reset Password", "https://portal/5/reset", "https://portal/5")];
        assert!(find_alternates(Some(&docs[0]), &docs, &LinkPolicy::allow_all(), 3).is_empty());
    }
}
