//! Shared response normalization.
//!
//! Model backends routinely wrap their answer in a fenced code block or lead
//! with prose. Every provider runs its raw reply through [`extract_json`]
//! before structural parsing, so the cleanup heuristics live in exactly one
//! place.

/// Locate the JSON object inside a raw model reply.
///
/// Order of attempts:
/// 1. a ```json (or bare ```) fenced block — returns the fence body;
/// 2. the first balanced `{…}` object, string- and escape-aware.
///
/// Returns `None` when neither yields a candidate; the caller classifies
/// that as a malformed response.
pub fn extract_json(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();

    if let Some(body) = fenced_block(trimmed) {
        return Some(body);
    }

    balanced_object(trimmed)
}

fn fenced_block(text: &str) -> Option<&str> {
    let start = text.find("```")?;
    let after_fence = &text[start + 3..];
    // Skip an optional language tag on the fence line.
    let body_start = after_fence.find('\n')? + 1;
    let body = &after_fence[body_start..];
    let end = body.find("```")?;
    Some(body[..end].trim())
}

fn balanced_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let bytes = text.as_bytes();

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, &byte) in bytes[start..].iter().enumerate() {
        if escape_next {
            escape_next = false;
            continue;
        }
        match byte {
            b'\\' if in_string => escape_next = true,
            b'"' => in_string = !in_string,
            b'{' if !in_string => depth += 1,
            b'}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + i + 1]);
                }
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_through_bare_json() {
        let raw = r#"{"a": 1}"#;
        assert_eq!(extract_json(raw), Some(r#"{"a": 1}"#));
    }

    #[test]
    fn strips_json_fence() {
        let raw = "```json\n{\"a\": 1}\n```";
        assert_eq!(extract_json(raw), Some("{\"a\": 1}"));
    }

    #[test]
    fn strips_untagged_fence() {
        let raw = "```\n{\"a\": 1}\n```";
        assert_eq!(extract_json(raw), Some("{\"a\": 1}"));
    }

    #[test]
    fn finds_object_after_prose() {
        let raw = "Here is my analysis:\n{\"label\": \"x\"}\nHope that helps!";
        assert_eq!(extract_json(raw), Some("{\"label\": \"x\"}"));
    }

    #[test]
    fn braces_inside_strings_do_not_confuse_the_scanner() {
        let raw = r#"{"quote": "he said {hi} to me", "n": 2}"#;
        assert_eq!(extract_json(raw), Some(raw));
    }

    #[test]
    fn escaped_quotes_are_handled() {
        let raw = r#"{"quote": "a \"nested\" brace }", "n": 1}"#;
        assert_eq!(extract_json(raw), Some(raw));
    }

    #[test]
    fn no_object_yields_none() {
        assert_eq!(extract_json("I cannot analyze this."), None);
        assert_eq!(extract_json("{ unterminated"), None);
        assert_eq!(extract_json(""), None);
    }
}
