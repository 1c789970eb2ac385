use std::sync::LazyLock;

use regex::Regex;

/// Well-formed `http(s)://` URL, ending at whitespace or a closing `)`, `>` or `]`.
static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://[^\s)>\]]+").expect("Invalid URL pattern"));

/// Returns every URL in `text`, in order of appearance, duplicates kept.
pub fn extract_urls(text: &str) -> Vec<String> {
    URL_PATTERN
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}
