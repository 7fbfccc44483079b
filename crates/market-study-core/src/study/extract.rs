//! Pull the fenced JSON block out of an agent's free-text answer.
//!
//! Model output is untrusted: every way the block can be missing or broken
//! maps to its own [`ExtractionError`] variant instead of a silent `None`.

use serde_json::Value;

use crate::error::ExtractionError;

const OPENING_FENCE: &str = "```json";
const CLOSING_FENCE: &str = "```";

/// Parse the first ```` ```json ```` block in `text` as a JSON object.
pub fn extract_structured_data(text: &str) -> Result<Value, ExtractionError> {
    let body = fenced_block(text)?;
    let value: Value =
        serde_json::from_str(body.trim()).map_err(|e| ExtractionError::InvalidJson {
            reason: e.to_string(),
        })?;

    if value.is_object() {
        Ok(value)
    } else {
        Err(ExtractionError::NotAnObject {
            found: json_kind(&value).to_string(),
        })
    }
}

fn fenced_block(text: &str) -> Result<&str, ExtractionError> {
    let mut search_from = 0;
    loop {
        let open = search_from
            + text[search_from..]
                .find(OPENING_FENCE)
                .ok_or(ExtractionError::MissingBlock)?;
        let after_tag = &text[open + OPENING_FENCE.len()..];

        // The info string must be exactly `json`; ```jsonc, ```json5 are other languages.
        let tag_ends = after_tag
            .chars()
            .next()
            .map_or(true, |c| c.is_whitespace() || c == '`');
        if tag_ends {
            return block_body(after_tag);
        }
        search_from = open + OPENING_FENCE.len();
    }
}

/// Body of a block whose opening tag has been consumed. A block closed on
/// its own opening line (```` ```json {..}``` ````) is accepted.
fn block_body(after_tag: &str) -> Result<&str, ExtractionError> {
    let line_end = after_tag.find('\n').unwrap_or(after_tag.len());
    let line = &after_tag[..line_end];
    if let Some(close) = line.find(CLOSING_FENCE) {
        return Ok(&line[..close]);
    }
    if line_end == after_tag.len() {
        return Err(ExtractionError::UnterminatedBlock);
    }

    let body = &after_tag[line_end + 1..];
    let close = body
        .find(CLOSING_FENCE)
        .ok_or(ExtractionError::UnterminatedBlock)?;
    Ok(&body[..close])
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
