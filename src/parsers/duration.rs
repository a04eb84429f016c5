use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

static ISO_DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^P(?:(\d+(?:\.\d+)?)D)?(?:T(?:(\d+(?:\.\d+)?)H)?(?:(\d+(?:\.\d+)?)M)?(?:(\d+(?:\.\d+)?)S)?)?$",
    )
    .expect("Invalid ISO 8601 duration regex")
});

/// Convert an ISO 8601 duration such as `PT1H30M` to whole minutes.
///
/// The day and second components are accepted but ignored. Returns `None` for
/// missing input, input that is not a duration, and durations of zero minutes.
pub fn parse_duration(duration: Option<&str>) -> Option<u32> {
    let caps = ISO_DURATION.captures(duration?.trim())?;

    let component = |index: usize| -> f64 {
        caps.get(index)
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .unwrap_or(0.0)
    };

    let minutes = (component(2) * 60.0 + component(3)).trunc();
    if minutes >= 1.0 && minutes <= u32::MAX as f64 {
        Some(minutes as u32)
    } else {
        None
    }
}

/// Same as [`parse_duration`] for a JSON-LD value; non-strings yield `None`.
pub fn parse_duration_value(value: Option<&Value>) -> Option<u32> {
    parse_duration(value.and_then(Value::as_str))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_hours_and_minutes() {
        assert_eq!(parse_duration(Some("PT30M")), Some(30));
        assert_eq!(parse_duration(Some("PT1H")), Some(60));
        assert_eq!(parse_duration(Some("PT1H30M")), Some(90));
        assert_eq!(parse_duration(Some("PT2H15M")), Some(135));
    }

    #[test]
    fn test_hours_times_sixty_plus_minutes() {
        for h in 0..5u32 {
            for m in [0u32, 1, 15, 59] {
                let expected = h * 60 + m;
                let parsed = parse_duration(Some(&format!("PT{h}H{m}M")));
                if expected == 0 {
                    assert_eq!(parsed, None);
                } else {
                    assert_eq!(parsed, Some(expected));
                }
            }
        }
    }

    #[test]
    fn test_days_and_seconds_ignored() {
        assert_eq!(parse_duration(Some("P1DT20M")), Some(20));
        assert_eq!(parse_duration(Some("PT10M30S")), Some(10));
        assert_eq!(parse_duration(Some("PT45S")), None);
    }

    #[test]
    fn test_zero_is_none() {
        assert_eq!(parse_duration(Some("P0D")), None);
        assert_eq!(parse_duration(Some("PT0M")), None);
        assert_eq!(parse_duration(Some("PT0H0M")), None);
    }

    #[test]
    fn test_fractional_components_truncate() {
        assert_eq!(parse_duration(Some("PT1.5H")), Some(90));
        assert_eq!(parse_duration(Some("PT12.7M")), Some(12));
    }

    #[test]
    fn test_malformed_input() {
        assert_eq!(parse_duration(None), None);
        assert_eq!(parse_duration(Some("")), None);
        assert_eq!(parse_duration(Some("30 minutes")), None);
        assert_eq!(parse_duration(Some("PT15-20M")), None);
    }

    #[test]
    fn test_json_values() {
        assert_eq!(parse_duration_value(Some(&json!("PT20M"))), Some(20));
        assert_eq!(parse_duration_value(Some(&json!(20))), None);
        assert_eq!(parse_duration_value(Some(&json!(null))), None);
        assert_eq!(parse_duration_value(None), None);
    }
}
