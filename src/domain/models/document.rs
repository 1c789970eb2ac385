use serde::{Deserialize, Serialize};

/// Title used when a row has neither a request type nor a service name.
pub const DEFAULT_TITLE: &str = "Request";

/// One raw catalog row, cells already trimmed, blanks as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogRow {
    pub service_number: String,
    pub service_name: String,
    pub description: String,
    pub portal_url: String,
    pub request_type: String,
    pub request_description: String,
    pub request_url: String,
}

/// A single requestable service form from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub service_number: String,
    pub service: String,
    pub portal_url: String,
    pub title: String,
    pub url: String,
    pub content: String,
}

impl Document {
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        portal_url: impl Into<String>,
    ) -> Self {
        let title = title.into();
        Self {
            service_number: String::new(),
            service: String::new(),
            portal_url: portal_url.into(),
            title: if title.is_empty() {
                DEFAULT_TITLE.to_string()
            } else {
                title
            },
            url: url.into(),
            content: String::new(),
        }
    }

    /// Normalizes a catalog row. The service name is not backfilled here;
    /// that needs the whole catalog, see [`super::Catalog::from_rows`].
    pub fn from_row(row: &CatalogRow) -> Self {
        let title = [row.request_type.as_str(), row.service_name.as_str()]
            .into_iter()
            .find(|s| !s.is_empty())
            .unwrap_or(DEFAULT_TITLE)
            .to_string();

        let content = format!(
            "{} - {}. Service: {}. {}",
            row.request_type, row.request_description, row.service_name, row.description
        )
        .trim()
        .to_string();

        Self {
            service_number: row.service_number.clone(),
            service: row.service_name.clone(),
            portal_url: row.portal_url.clone(),
            title,
            url: row.request_url.clone(),
            content,
        }
    }

    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = service.into();
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn portal_url(&self) -> &str {
        &self.portal_url
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    /// Text fed to the embedding model for this document.
    pub fn index_text(&self) -> String {
        format!("{} | {}", self.title, self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> CatalogRow {
        CatalogRow {
            service_number: "12".to_string(),
            service_name: "Identity".to_string(),
            description: "Accounts and access.".to_string(),
            portal_url: "https://portal/12".to_string(),
            request_type: "Reset Password".to_string(),
            request_description: "Reset a forgotten password".to_string(),
            request_url: "https://portal/12/reset".to_string(),
        }
    }

    #[test]
    fn test_from_row_maps_fields() {
        let doc = Document::from_row(&row());

        assert_eq!(doc.title(), "Reset Password");
        assert_eq!(doc.url(), "https://portal/12/reset");
        assert_eq!(doc.portal_url(), "https://portal/12");
        assert_eq!(doc.service(), "Identity");
        assert_eq!(
            doc.content,
            "Reset Password - Reset a forgotten password. Service: Identity. Accounts and access."
        );
    }

    #[test]
    fn test_title_falls_back_to_service_then_default() {
        let mut r = row();
        r.request_type.clear();
        assert_eq!(Document::from_row(&r).title(), "Identity");

        r.service_name.clear();
        assert_eq!(Document::from_row(&r).title(), DEFAULT_TITLE);
    }

    #[test]
    fn test_new_never_has_empty_title() {
        let doc = Document::new("", "https://portal/1/x", "https://portal/1");
        assert_eq!(doc.title(), DEFAULT_TITLE);
    }

    #[test]
    fn test_index_text() {
        let doc = Document::new("VPN", "u", "p").with_content("Remote access");
        assert_eq!(doc.index_text(), "VPN | Remote access");
    }
}
