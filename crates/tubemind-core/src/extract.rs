//! Pulling a JSON object out of free-form model output.
//!
//! Models wrap JSON in markdown fences and chatter. `extract` strips the fences and
//! returns the first top-level brace-balanced object that actually parses, falling back
//! to the span between the first `{` and the last `}` when no balanced candidate parses.

use serde::de::DeserializeOwned;

use crate::error::DecodeError;

/// Isolate the JSON object embedded in `raw`.
///
/// Returns the trimmed text unchanged when it holds no `{ ... }` span at all; the
/// caller's parse then reports the failure.
pub fn extract(raw: &str) -> String {
    let cleaned = raw.replace("```json", "").replace("```", "");

    // Objects nested in a rejected candidate are never candidates themselves.
    let mut from = 0;
    while let Some(offset) = cleaned[from..].find('{') {
        let start = from + offset;
        let Some(end) = scan_object(&cleaned, start) else {
            break;
        };
        let candidate = &cleaned[start..end];
        if is_json_object(candidate) {
            return candidate.to_string();
        }
        from = end;
    }

    match (cleaned.find('{'), cleaned.rfind('}')) {
        (Some(start), Some(end)) if end > start => cleaned[start..=end].trim().to_string(),
        _ => cleaned.trim().to_string(),
    }
}

/// Extract and decode `raw` into `T`.
pub fn decode<T: DeserializeOwned>(raw: &str) -> Result<T, DecodeError> {
    let candidate = extract(raw);
    if !candidate.starts_with('{') {
        return Err(DecodeError::NoJsonObject);
    }
    Ok(serde_json::from_str(&candidate)?)
}

/// Byte offset one past the `}` closing the object that opens at `start`.
fn scan_object(text: &str, start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            if escape {
                escape = false;
            } else if ch == '\\' {
                escape = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(start + offset + ch.len_utf8());
                }
            }
            _ => {}
        }
    }
    None
}

fn is_json_object(candidate: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(candidate).is_ok_and(|value| value.is_object())
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Probe {
        summary: String,
        themes: Vec<String>,
    }

    #[test]
    fn strips_fences_and_surrounding_prose() {
        let raw = "prefix ```json {\"summary\":\"s\",\"themes\":[]} ``` suffix";
        assert_eq!(extract(raw), r#"{"summary":"s","themes":[]}"#);

        let probe: Probe = decode(raw).unwrap();
        assert_eq!(probe.summary, "s");
        assert!(probe.themes.is_empty());
    }

    #[test]
    fn plain_object_is_returned_trimmed() {
        assert_eq!(extract("  \n{\"a\":1}\n "), r#"{"a":1}"#);
    }

    #[test]
    fn ignores_braces_in_trailing_prose() {
        let raw = "Here you go: {\"a\":{\"b\":2}} Use it like {this}.";
        assert_eq!(extract(raw), r#"{"a":{"b":2}}"#);
    }

    #[test]
    fn skips_leading_prose_braces_that_are_not_json() {
        let raw = "Template {name} filled: {\"name\":\"x\"}";
        assert_eq!(extract(raw), r#"{"name":"x"}"#);
    }

    #[test]
    fn braces_inside_strings_do_not_end_the_object() {
        let raw = r#"{"summary":"a } b { c \" }","themes":["x"]}"#;
        let probe: Probe = decode(raw).unwrap();
        assert_eq!(probe.summary, r#"a } b { c " }"#);
        assert_eq!(probe.themes, vec!["x"]);
    }

    #[test]
    fn multibyte_text_around_object() {
        let raw = "تحلیل: {\"summary\":\"خلاصه\",\"themes\":[\"موضوع\"]} پایان";
        let probe: Probe = decode(raw).unwrap();
        assert_eq!(probe.summary, "خلاصه");
    }

    #[test]
    fn falls_back_to_first_and_last_brace() {
        let raw = "oops {\"a\": 1, } trailing }";
        assert_eq!(extract(raw), "{\"a\": 1, } trailing }");
    }

    #[test]
    fn malformed_outer_object_does_not_yield_a_nested_one() {
        let raw = r#"{"summary":"outer real summary","themes":["a"],"details":{"summary":"inner note"},}"#;
        assert_eq!(extract(raw), raw);
        assert!(matches!(
            decode::<serde_json::Value>(raw),
            Err(DecodeError::Json(_))
        ));
    }

    #[test]
    fn unbalanced_outer_object_does_not_yield_a_nested_one() {
        let raw = r#"{"summary":"cut off","details":{"summary":"inner"}"#;
        assert_eq!(extract(raw), raw);
        assert!(decode::<serde_json::Value>(raw).is_err());
    }

    #[test]
    fn text_without_braces_is_only_trimmed() {
        assert_eq!(extract("  I cannot watch videos.  "), "I cannot watch videos.");
        assert!(matches!(
            decode::<Probe>("I cannot watch videos."),
            Err(DecodeError::NoJsonObject)
        ));
    }

    #[test]
    fn reversed_braces_are_not_a_span() {
        assert_eq!(extract("} nothing here {"), "} nothing here {");
    }

    #[test]
    fn missing_required_field_is_a_json_error() {
        assert!(matches!(
            decode::<Probe>(r#"{"summary":"s"}"#),
            Err(DecodeError::Json(_))
        ));
    }
}
