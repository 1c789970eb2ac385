use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{ActionElement, Block, Document, LinkPolicy, OutboundMessage, ResolvedAnswer};

pub const BOT_NAME: &str = "Ask-BestiE";
pub const DEFAULT_ALL_PORTALS_URL: &str = "https://bestegg.atlassian.net/servicedesk/customer/portals";
const FALLBACK_SUMMARY: &str = "Recommended link";
const SUMMARY_ANSWER_CHARS: usize = 140;

static ANSWER_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?im)^\s*answer\s*:\s*(.+)$").expect("Invalid answer pattern"));

/// The remainder of the first `Answer:` line, or the whole trimmed text.
pub fn extract_answer_text(model_text: &str) -> String {
    if model_text.is_empty() {
        return String::new();
    }
    match ANSWER_LINE.captures(model_text).and_then(|c| c.get(1)) {
        Some(m) => m.as_str().trim().to_string(),
        None => model_text.trim().to_string(),
    }
}

/// Renders a [`ResolvedAnswer`] as a chat message.
///
/// Answers the external model contributed to use the model-backed layout
/// (answer line, link line, buttons); all others use the link-only layout.
/// Every link shown passes the [`LinkPolicy`].
#[derive(Debug, Clone)]
pub struct ReplyComposer {
    all_portals_url: String,
    link_policy: LinkPolicy,
}

impl ReplyComposer {
    pub fn new(link_policy: LinkPolicy) -> Self {
        Self {
            all_portals_url: DEFAULT_ALL_PORTALS_URL.to_string(),
            link_policy,
        }
    }

    pub fn with_all_portals_url(mut self, url: impl Into<String>) -> Self {
        self.all_portals_url = url.into();
        self
    }

    pub fn compose(&self, channel: &str, answer: &ResolvedAnswer) -> OutboundMessage {
        if answer.is_model_backed() {
            self.compose_model_backed(channel, answer)
        } else {
            self.compose_local(channel, answer)
        }
    }

    fn compose_model_backed(&self, channel: &str, answer: &ResolvedAnswer) -> OutboundMessage {
        let answer_text = extract_answer_text(&answer.model_text);
        let primary_link = [&answer.primary_link, &answer.request_url, &answer.portal_url]
            .into_iter()
            .find(|l| !l.is_empty())
            .cloned()
            .unwrap_or_default();

        let mut blocks = vec![self.header()];
        if !answer_text.is_empty() {
            blocks.push(Block::section(format!("Answer: {}", answer_text)));
        }
        blocks.push(Block::section(format!("Link: {}", self.link_line(&primary_link, answer))));
        self.push_body(&mut blocks, answer);

        let text = if answer_text.is_empty() {
            summary_title(answer)
        } else {
            let head: String = answer_text.chars().take(SUMMARY_ANSWER_CHARS).collect();
            format!("Answer: {}...", head)
        };

        OutboundMessage::new(channel, text, blocks)
    }

    fn compose_local(&self, channel: &str, answer: &ResolvedAnswer) -> OutboundMessage {
        let mut blocks = vec![self.header()];
        self.push_body(&mut blocks, answer);

        OutboundMessage::new(channel, summary_title(answer), blocks)
    }

    fn header(&self) -> Block {
        Block::section(format!("*{}*", BOT_NAME))
    }

    fn allowed(&self, url: &str) -> bool {
        !url.is_empty() && self.link_policy.allows(url)
    }

    fn link_line(&self, primary_link: &str, answer: &ResolvedAnswer) -> String {
        let mut pieces = Vec::new();
        if self.allowed(primary_link) {
            pieces.push(format!("<{}>", primary_link));
        } else {
            pieces.push("—".to_string());
        }
        if self.allowed(&answer.request_url) {
            pieces.push(format!("<{}|Open Request>", answer.request_url));
        }
        if self.allowed(&answer.portal_url) {
            pieces.push(format!("<{}|Portal Home>", answer.portal_url));
        }
        pieces.join(", ")
    }

    /// Buttons, alternates and footer, shared by both layouts.
    fn push_body(&self, blocks: &mut Vec<Block>, answer: &ResolvedAnswer) {
        let mut buttons = Vec::new();
        if self.allowed(&answer.request_url) {
            let label = if answer.request_title.is_empty() {
                "Open request"
            } else {
                answer.request_title.as_str()
            };
            buttons.push(ActionElement::button(label, answer.request_url.as_str()));
        }
        if self.allowed(&answer.portal_url) {
            buttons.push(ActionElement::button("Portal home", answer.portal_url.as_str()));
        }
        if !buttons.is_empty() {
            blocks.push(Block::Actions { elements: buttons });
        }

        let bullets = self.alternate_bullets(&answer.alternates);
        if !bullets.is_empty() {
            blocks.push(Block::Divider);
            blocks.push(Block::section(format!("*You could also try:*\n{}", bullets)));
        }

        blocks.push(Block::Divider);
        blocks.push(Block::section(format!(
            "If that’s not what you’re looking for, here are all the portals: <{}|All portals>",
            self.all_portals_url
        )));
    }

    fn alternate_bullets(&self, alternates: &[Document]) -> String {
        alternates
            .iter()
            .filter_map(|doc| {
                let title = doc.title().trim();
                let url = doc.url().trim();
                (!title.is_empty() && self.allowed(url)).then(|| format!("• <{}|{}>", url, title))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn summary_title(answer: &ResolvedAnswer) -> String {
    if answer.request_title.is_empty() {
        FALLBACK_SUMMARY.to_string()
    } else {
        answer.request_title.clone()
    }
}
