use serde_json::Value;

use crate::domain::ExternalAnswer;

const PREDICTION_FIELDS: [&str; 3] = ["text", "output_text", "answer"];
const GENERIC_FIELDS: [&str; 4] = ["output", "result", "answer", "text"];

/// Normalizes a serving endpoint response into an [`ExternalAnswer`].
///
/// Shapes are checked in a fixed order: `predictions`/`prediction` lists of
/// objects, then chat-style `choices`, then top-level `output`, `result`,
/// `answer` or `text`, then a list whose first item is a string. Anything
/// else gives the empty answer.
pub fn parse_response(body: &Value) -> ExternalAnswer {
    ExternalAnswer::from_text(&extract_text(body).unwrap_or_default())
}

fn extract_text(body: &Value) -> Option<String> {
    match body {
        Value::Object(map) => {
            let predictions = non_empty_field(body, "predictions")
                .or_else(|| non_empty_field(body, "prediction"));

            if let Some(first) = predictions.and_then(|p| p.as_array()?.first().filter(|v| v.is_object())) {
                return first_text(first, &PREDICTION_FIELDS);
            }

            if let Some(choices) = map.get("choices").and_then(Value::as_array).filter(|c| !c.is_empty()) {
                let first = choices.first()?;
                return text_field(first, "text")
                    .or_else(|| text_field(first.get("message")?, "content"));
            }

            first_text(body, &GENERIC_FIELDS)
        }
        Value::Array(items) => items.first()?.as_str().map(str::to_string),
        _ => None,
    }
}

/// A field that is present and not `null`, `false`, `0`, `""`, `[]` or `{}`.
fn non_empty_field<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value.get(key).filter(|v| match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    })
}

fn text_field(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn first_text(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| text_field(value, key))
}
