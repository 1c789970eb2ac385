use anyhow::Result;

use crate::domain::SearchResult;

use super::super::Container;

pub struct SearchController<'a> {
    container: &'a Container,
}

impl<'a> SearchController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn search(&self, query: String, num: usize) -> Result<String> {
        let index = self.container.catalog_index();
        let results = index.top_k(&query, num).await?;

        Ok(format_search_results(&results))
    }
}

fn format_search_results(results: &[SearchResult<'_>]) -> String {
    if results.is_empty() {
        return "No matching requests.".to_string();
    }

    let mut output = format!("Found {} results:\n\n", results.len());

    for (i, result) in results.iter().enumerate() {
        let document = result.document();
        output.push_str(&format!("{}. {}\n", i + 1, result.display_line()));
        if !document.service().is_empty() {
            output.push_str(&format!("   Service: {}\n", document.service()));
        }
        if !document.portal_url().is_empty() {
            output.push_str(&format!("   Portal: {}\n", document.portal_url()));
        }
        output.push('\n');
    }

    output
}
