use serde_json::{json, Value};

use crate::domain::LinkPolicy;

pub const TEMPERATURE: f64 = 0.2;
pub const MAX_TOKENS: u32 = 256;

/// Request body layouts a model serving endpoint may accept.
///
/// The endpoint's schema is not known in advance, so the client tries
/// [`PayloadShape::ATTEMPT_ORDER`] in order until one yields text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadShape {
    /// `{"inputs": {"question": ...}}`
    KeyedInputs,
    /// `{"inputs": "..."}`
    BareInputs,
    /// `{"messages": [{"role": "user", "content": ...}]}`
    ChatMessages,
}

impl PayloadShape {
    pub const ATTEMPT_ORDER: [PayloadShape; 3] = [
        PayloadShape::KeyedInputs,
        PayloadShape::BareInputs,
        PayloadShape::ChatMessages,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PayloadShape::KeyedInputs => "keyed_inputs",
            PayloadShape::BareInputs => "bare_inputs",
            PayloadShape::ChatMessages => "chat_messages",
        }
    }

    pub fn body(&self, prompt: &str) -> Value {
        let mut body = match self {
            PayloadShape::KeyedInputs => json!({ "inputs": { "question": prompt } }),
            PayloadShape::BareInputs => json!({ "inputs": prompt }),
            PayloadShape::ChatMessages => {
                json!({ "messages": [{ "role": "user", "content": prompt }] })
            }
        };
        body["temperature"] = json!(TEMPERATURE);
        body["max_tokens"] = json!(MAX_TOKENS);
        body
    }
}

/// Instruction prepended to every question so the model answers with one
/// `Answer:` line and one `Link:` line on an allow-listed prefix.
pub fn format_instruction(policy: &LinkPolicy) -> String {
    let approved = if policy.is_unrestricted() {
        "[no restriction]".to_string()
    } else {
        policy.prefixes().join(", ")
    };

    format!(
        "You are Ask-BestiE, a concise internal assistant. Respond in EXACTLY this format:\n\
         \n\
         Answer: <one short, friendly paragraph that identifies the correct JSM portal/form and what it’s for>\n\
         Link: <ONE best URL on an approved domain>\n\
         \n\
         Approved link domains/prefixes: {approved}.\n\
         Do not include multiple links. Do not add Markdown around the URL in the Link line."
    )
}

pub fn compose_prompt(instruction: &str, user_text: &str) -> String {
    format!("{}\n\nUser: {}", instruction.trim(), user_text.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bodies_carry_generation_params() {
        for shape in PayloadShape::ATTEMPT_ORDER {
            let body = shape.body("hi");
            assert_eq!(body["temperature"], json!(0.2));
            assert_eq!(body["max_tokens"], json!(256));
        }
    }

    #[test]
    fn test_body_layouts() {
        assert_eq!(PayloadShape::KeyedInputs.body("q")["inputs"]["question"], "q");
        assert_eq!(PayloadShape::BareInputs.body("q")["inputs"], "q");
        assert_eq!(
            PayloadShape::ChatMessages.body("q")["messages"][0],
            json!({"role": "user", "content": "q"})
        );
    }

    #[test]
    fn test_instruction_lists_prefixes() {
        let restricted = format_instruction(&LinkPolicy::parse("https://a/,https://b/"));
        assert!(restricted.contains("Approved link domains/prefixes: https://a/, https://b/."));

        let open = format_instruction(&LinkPolicy::allow_all());
        assert!(open.contains("[no restriction]"));
    }

    #[test]
    fn test_compose_prompt() {
        let prompt = compose_prompt("  Be brief.\n", "  vpn please ");
        assert_eq!(prompt, "Be brief.\n\nUser: vpn please");
    }
}
