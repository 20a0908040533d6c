//! Input sanitizer applied to every visitor-supplied text field.
//!
//! Trims, strips angle brackets and caps the length. This is a naive
//! tag-injection filter, not a substitute for output encoding.

use serde_json::Value;

/// Maximum number of characters kept per field.
pub const MAX_FIELD_LENGTH: usize = 1000;

/// Sanitize an arbitrary JSON value. Anything that is not a string yields `""`.
pub fn sanitize(input: &Value) -> String {
    match input {
        Value::String(s) => sanitize_str(s),
        _ => String::new(),
    }
}

/// Sanitize a string: trim, drop every `<` and `>`, keep the first
/// [`MAX_FIELD_LENGTH`] characters.
pub fn sanitize_str(input: &str) -> String {
    input
        .trim()
        .chars()
        .filter(|c| !matches!(c, '<' | '>'))
        .take(MAX_FIELD_LENGTH)
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn non_strings_become_empty() {
        for value in [
            json!(null),
            json!(42),
            json!(true),
            json!(["a"]),
            json!({"a": "b"}),
        ] {
            assert_eq!(sanitize(&value), "", "input {value}");
        }
    }

    #[test]
    fn trims_whitespace() {
        assert_eq!(sanitize_str("  hello \n\t"), "hello");
    }

    #[test]
    fn strips_angle_brackets() {
        assert_eq!(
            sanitize_str("<script>alert(1)</script>"),
            "scriptalert(1)/script"
        );
    }

    #[test]
    fn only_brackets_sanitize_to_empty() {
        assert_eq!(sanitize_str("<<"), "");
        assert_eq!(sanitize(&json!(" <> ")), "");
    }

    #[test]
    fn caps_length_in_characters() {
        let long = "é".repeat(MAX_FIELD_LENGTH + 50);
        let out = sanitize_str(&long);
        assert_eq!(out.chars().count(), MAX_FIELD_LENGTH);
    }

    #[test]
    fn truncation_happens_after_stripping() {
        let input = format!("{}{}", "<".repeat(10), "a".repeat(MAX_FIELD_LENGTH));
        assert_eq!(sanitize_str(&input), "a".repeat(MAX_FIELD_LENGTH));
    }

    #[test]
    fn output_never_contains_brackets_or_exceeds_cap() {
        let samples = [
            String::new(),
            "<".into(),
            "a<b>c".into(),
            " <<<>>> spaced <tag> ".into(),
            "x>".repeat(900),
            "<p>".repeat(700),
        ];
        for s in &samples {
            let out = sanitize_str(s);
            assert!(!out.contains('<') && !out.contains('>'), "{out:?}");
            assert!(out.chars().count() <= MAX_FIELD_LENGTH);
        }
    }
}
