use regex::Regex;
use std::sync::LazyLock;

/// Unicode vulgar fractions and their values.
pub const UNICODE_FRACTIONS: &[(char, f64)] = &[
    ('½', 1.0 / 2.0),
    ('⅓', 1.0 / 3.0),
    ('⅔', 2.0 / 3.0),
    ('¼', 1.0 / 4.0),
    ('¾', 3.0 / 4.0),
    ('⅕', 1.0 / 5.0),
    ('⅖', 2.0 / 5.0),
    ('⅗', 3.0 / 5.0),
    ('⅘', 4.0 / 5.0),
    ('⅙', 1.0 / 6.0),
    ('⅚', 5.0 / 6.0),
    ('⅛', 1.0 / 8.0),
    ('⅜', 3.0 / 8.0),
    ('⅝', 5.0 / 8.0),
    ('⅞', 7.0 / 8.0),
];

static MIXED_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s+(\d+)\s*/\s*(\d+)").expect("Invalid mixed number regex"));

static FRACTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*/\s*(\d+)").expect("Invalid fraction regex"));

static DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d*\.?\d+").expect("Invalid decimal regex"));

fn fraction_glyph_value(c: char) -> Option<f64> {
    UNICODE_FRACTIONS
        .iter()
        .find(|(glyph, _)| *glyph == c)
        .map(|(_, value)| *value)
}

/// Parse numeric text into a quantity.
///
/// Handles integers, decimals, `1/2`, mixed numbers like `1 1/2` and unicode
/// glyphs like `½` (also combined, as in `1½`). Returns `0.0` when nothing
/// numeric is found; callers treat zero as "no quantity".
pub fn parse_fraction(text: &str) -> f64 {
    let mut total = 0.0;
    let mut rest = String::with_capacity(text.len());
    for c in text.chars() {
        match fraction_glyph_value(c) {
            Some(value) => total += value,
            None => rest.push(c),
        }
    }

    if let Some(caps) = MIXED_NUMBER.captures(&rest) {
        let whole = number_at(&caps, 1);
        total += whole + ratio(number_at(&caps, 2), number_at(&caps, 3));
    } else if let Some(caps) = FRACTION.captures(&rest) {
        total += ratio(number_at(&caps, 1), number_at(&caps, 2));
    } else if let Some(m) = DECIMAL.find(&rest) {
        total += m.as_str().parse::<f64>().unwrap_or(0.0);
    }

    total
}

fn number_at(caps: &regex::Captures, index: usize) -> f64 {
    caps.get(index)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_integers_and_decimals() {
        assert_eq!(parse_fraction("2"), 2.0);
        assert_eq!(parse_fraction("1.5"), 1.5);
        assert_eq!(parse_fraction(".25"), 0.25);
        assert_eq!(parse_fraction("  12 "), 12.0);
    }

    #[test]
    fn test_plain_and_mixed_fractions() {
        assert_eq!(parse_fraction("1/2"), 0.5);
        assert_eq!(parse_fraction("1 1/2"), 1.5);
        assert!(approx(parse_fraction("2 2/3"), 2.0 + 2.0 / 3.0));
    }

    #[test]
    fn test_unicode_glyphs() {
        assert_eq!(parse_fraction("½"), 0.5);
        assert_eq!(parse_fraction("1½"), 1.5);
        assert_eq!(parse_fraction("1 ½"), 1.5);
        assert_eq!(parse_fraction("¾"), 0.75);
        assert!(approx(parse_fraction("⅓"), 1.0 / 3.0));
    }

    #[test]
    fn test_every_glyph_has_positive_value() {
        for (glyph, _) in UNICODE_FRACTIONS {
            assert!(parse_fraction(&glyph.to_string()) > 0.0, "{glyph}");
        }
    }

    #[test]
    fn test_range_collapses_to_first_number() {
        assert_eq!(parse_fraction("2 3"), 2.0);
    }

    #[test]
    fn test_unrecognized_input_is_zero() {
        assert_eq!(parse_fraction(""), 0.0);
        assert_eq!(parse_fraction("a pinch"), 0.0);
        assert_eq!(parse_fraction("1/0"), 0.0);
    }
}
