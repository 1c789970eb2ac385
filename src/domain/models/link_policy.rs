use serde::{Deserialize, Serialize};

/// Allow-list of URL prefixes. An empty list allows every link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkPolicy {
    prefixes: Vec<String>,
}

impl LinkPolicy {
    pub fn new(prefixes: Vec<String>) -> Self {
        let prefixes = prefixes
            .into_iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        Self { prefixes }
    }

    pub fn allow_all() -> Self {
        Self::default()
    }

    /// Parses a comma-separated prefix list such as `ALLOWED_LINK_PREFIXES`.
    pub fn parse(list: &str) -> Self {
        Self::new(list.split(',').map(str::to_string).collect())
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    pub fn is_unrestricted(&self) -> bool {
        self.prefixes.is_empty()
    }

    pub fn allows(&self, url: &str) -> bool {
        self.is_unrestricted() || self.prefixes.iter().any(|p| url.starts_with(p.as_str()))
    }
}
