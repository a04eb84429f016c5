use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Outside,
    InString,
    Escaped,
}

/// Repair JSON-LD that has raw control characters inside string values.
///
/// Many publishers paste multi-line text straight into their JSON-LD, which
/// strict parsers reject. Inside strings, newlines, carriage returns and tabs
/// are rewritten to their escapes and other control characters are dropped.
/// Text outside strings is left untouched.
pub fn sanitize_json_ld(json: &str) -> String {
    let mut result = String::with_capacity(json.len());
    let mut state = ScanState::Outside;

    for c in json.chars() {
        state = match state {
            ScanState::Outside => {
                result.push(c);
                if c == '"' {
                    ScanState::InString
                } else {
                    ScanState::Outside
                }
            }
            ScanState::InString => match c {
                '"' => {
                    result.push(c);
                    ScanState::Outside
                }
                '\\' => {
                    result.push(c);
                    ScanState::Escaped
                }
                '\n' => {
                    result.push_str("\\n");
                    ScanState::InString
                }
                '\r' => {
                    result.push_str("\\r");
                    ScanState::InString
                }
                '\t' => {
                    result.push_str("\\t");
                    ScanState::InString
                }
                c if c.is_control() => ScanState::InString,
                c => {
                    result.push(c);
                    ScanState::InString
                }
            },
            ScanState::Escaped => {
                result.push(c);
                ScanState::InString
            }
        };
    }

    if state != ScanState::Outside {
        debug!("JSON-LD ends inside a string literal");
    }

    result
}

/// Strict parse first, then a second attempt on the sanitized text.
pub fn parse_json_ld(raw: &str) -> Result<serde_json::Value, serde_json::Error> {
    match serde_json::from_str(raw) {
        Ok(value) => Ok(value),
        Err(strict_err) => {
            debug!("Strict JSON-LD parse failed ({strict_err}), retrying sanitized");
            serde_json::from_str(&sanitize_json_ld(raw))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escapes_newlines_inside_strings() {
        let raw = "{\"name\": \"Line one\nLine two\"}";
        assert!(serde_json::from_str::<serde_json::Value>(raw).is_err());

        let value: serde_json::Value = serde_json::from_str(&sanitize_json_ld(raw)).unwrap();
        assert_eq!(value["name"], "Line one\nLine two");
    }

    #[test]
    fn test_leaves_structural_whitespace_alone() {
        let raw = "{\n\t\"a\": 1,\r\n\t\"b\": [1, 2]\n}";
        assert_eq!(sanitize_json_ld(raw), raw);
    }

    #[test]
    fn test_escaped_quote_does_not_end_string() {
        let raw = "{\"text\": \"say \\\"hi\\\"\nnow\"}";
        let value: serde_json::Value = serde_json::from_str(&sanitize_json_ld(raw)).unwrap();
        assert_eq!(value["text"], "say \"hi\"\nnow");
    }

    #[test]
    fn test_escaped_backslash_before_quote() {
        let raw = "{\"path\": \"C:\\\\\", \"next\": \"a\tb\"}";
        let value: serde_json::Value = serde_json::from_str(&sanitize_json_ld(raw)).unwrap();
        assert_eq!(value["path"], "C:\\");
        assert_eq!(value["next"], "a\tb");
    }

    #[test]
    fn test_drops_other_control_characters() {
        let raw = "{\"name\": \"Soup\u{0008}\u{0001}\"}";
        let value: serde_json::Value = serde_json::from_str(&sanitize_json_ld(raw)).unwrap();
        assert_eq!(value["name"], "Soup");
    }

    #[test]
    fn test_parse_json_ld_prefers_strict() {
        let value = parse_json_ld("{\"a\": \"b\"}").unwrap();
        assert_eq!(value["a"], "b");
        assert!(parse_json_ld("{not json").is_err());
    }
}
