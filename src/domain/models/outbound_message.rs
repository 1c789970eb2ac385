use serde::{Deserialize, Serialize};

/// Text object inside a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TextObject {
    Mrkdwn { text: String },
    PlainText { text: String },
}

impl TextObject {
    pub fn mrkdwn(text: impl Into<String>) -> Self {
        Self::Mrkdwn { text: text.into() }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::PlainText { text: text.into() }
    }

    pub fn text(&self) -> &str {
        match self {
            TextObject::Mrkdwn { text } | TextObject::PlainText { text } => text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionElement {
    Button { text: TextObject, url: String },
}

impl ActionElement {
    pub fn button(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self::Button {
            text: TextObject::plain(label),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        match self {
            ActionElement::Button { url, .. } => url,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ActionElement::Button { text, .. } => text.text(),
        }
    }
}

/// Layout block of an outbound chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Section { text: TextObject },
    Actions { elements: Vec<ActionElement> },
    Divider,
}

impl Block {
    pub fn section(markdown: impl Into<String>) -> Self {
        Self::Section {
            text: TextObject::mrkdwn(markdown),
        }
    }

    pub fn section_text(&self) -> Option<&str> {
        match self {
            Block::Section { text } => Some(text.text()),
            _ => None,
        }
    }
}

/// Structured reply handed to the messaging platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub channel: String,
    /// Plain-text summary shown where blocks cannot be rendered.
    pub text: String,
    pub blocks: Vec<Block>,
}

impl OutboundMessage {
    pub fn new(channel: impl Into<String>, text: impl Into<String>, blocks: Vec<Block>) -> Self {
        Self {
            channel: channel.into(),
            text: text.into(),
            blocks,
        }
    }

    pub fn buttons(&self) -> Vec<&ActionElement> {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                Block::Actions { elements } => Some(elements.iter()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    pub fn section_texts(&self) -> Vec<&str> {
        self.blocks.iter().filter_map(Block::section_text).collect()
    }
}
