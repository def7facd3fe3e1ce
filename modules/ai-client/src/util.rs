use serde::de::DeserializeOwned;

use crate::error::Result;

/// Truncate a string to at most `max_bytes` bytes at a character boundary.
pub fn truncate_to_char_boundary(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while !s.is_char_boundary(end) && end > 0 {
        end -= 1;
    }
    &s[..end]
}

/// Strip markdown code blocks from a response.
pub fn strip_code_blocks(response: &str) -> &str {
    response
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim()
}

/// Parse a completion as JSON into `T`. Fences are stripped first; empty
/// content decodes as the empty object, so default-tolerant types succeed.
/// Anything else that is not valid JSON is a `MalformedResponse`.
pub fn parse_json<T: DeserializeOwned>(content: &str) -> Result<T> {
    let stripped = strip_code_blocks(content);
    let body = if stripped.is_empty() { "{}" } else { stripped };
    Ok(serde_json::from_str(body)?)
}
