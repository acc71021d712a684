//! Recovering JSON from free-form model replies.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

/// Find the JSON payload in a model reply.
///
/// Tries, in order: the whole reply, the first fenced code block
/// (` ```json ... ``` ` or plain ` ``` ... ``` `), and the first object that
/// decodes starting at any `{` in the surrounding prose.
pub fn extract_json(reply: &str) -> Option<Value> {
    lazy_static! {
        static ref FENCED_BLOCK: Regex =
            Regex::new(r"(?s)```(?:json|JSON)?\s*\n?(.*?)```").unwrap();
    }

    let text = reply.trim().trim_matches('\u{feff}');

    if let Ok(value) = serde_json::from_str::<Value>(text) {
        return Some(value);
    }

    if let Some(captures) = FENCED_BLOCK.captures(text)
        && let Ok(value) = serde_json::from_str::<Value>(captures[1].trim())
    {
        return Some(value);
    }

    text.match_indices('{').find_map(|(start, _)| {
        // Only the first value is decoded; trailing prose is never read
        match serde_json::Deserializer::from_str(&text[start..])
            .into_iter::<Value>()
            .next()
        {
            Some(Ok(value @ Value::Object(_))) => Some(value),
            _ => None,
        }
    })
}
