use anyhow::Result;

use super::super::Container;

/// Channel id stamped on replies composed from the command line.
pub const CLI_CHANNEL: &str = "cli";

pub struct AskController<'a> {
    container: &'a Container,
}

impl<'a> AskController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    /// Runs the answer pipeline for `text` and returns the reply payload
    /// that would be posted, without posting it.
    pub async fn ask(&self, text: String, plain: bool) -> Result<String> {
        let use_case = self.container.respond_to_event_use_case();
        let message = use_case.reply_for(CLI_CHANNEL, &text).await?;

        if !plain {
            return Ok(serde_json::to_string_pretty(&message)?);
        }

        let mut output = String::new();
        for section in message.section_texts() {
            output.push_str(section);
            output.push_str("\n\n");
        }
        for button in message.buttons() {
            output.push_str(&format!("[{}] {}\n", button.label(), button.url()));
        }
        Ok(output.trim_end().to_string())
    }
}
