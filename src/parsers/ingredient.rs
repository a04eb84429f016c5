use super::quantity::parse_fraction;
use super::units::{match_leading_unit, ALTERNATE_MEASUREMENT};
use crate::model::ParsedIngredient;
use regex::Regex;
use std::sync::LazyLock;

static LEADING_QUANTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\d½⅓⅔¼¾⅕⅖⅗⅘⅙⅚⅛⅜⅝⅞][\d½⅓⅔¼¾⅕⅖⅗⅘⅙⅚⅛⅜⅝⅞\s/.\-–]*")
        .expect("Invalid leading quantity regex")
});

static LIST_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[•▢□◦*·]|-\s)\s*").expect("Invalid list marker regex"));

const NAME_EDGE_PUNCTUATION: &[char] = &[',', ';', ':', '/', '-', '–', '.', '*', '(', ')'];

/// Split one raw ingredient line into quantity, unit, name and notes.
///
/// Never fails: when nothing can be recognised the raw line comes back as the
/// ingredient name with no quantity, unit or notes. Blank lines are not
/// ingredients; callers drop them before parsing.
pub fn parse_ingredient(raw: &str) -> ParsedIngredient {
    let original = raw.trim();
    let line = LIST_MARKER.replace(original, "");

    let mut notes = Vec::new();

    let (head, trailing) = split_top_level_comma(&line);
    if let Some(trailing) = trailing {
        notes.push(trailing.trim().to_string());
    }

    let (without_parens, asides) = extract_parenthesized(head);
    notes.extend(asides);

    let mut working = collapse_whitespace(&without_parens);
    if let Some((range, alternate)) = find_alternate_measurement(&working) {
        notes.push(alternate);
        working = collapse_whitespace(&format!(
            "{} {}",
            &working[..range.start],
            &working[range.end..]
        ));
    }

    let mut quantity = None;
    let mut unit = String::new();
    let mut rest = working.as_str();

    if let Some(m) = LEADING_QUANTITY.find(rest) {
        let captured = m.as_str().replace(['-', '–'], " ");
        let value = parse_fraction(&captured);
        if value > 0.0 {
            quantity = Some(value);
        }
        rest = rest[m.end()..].trim_start();

        if let Some((matched_unit, consumed)) = match_leading_unit(rest) {
            unit = matched_unit;
            rest = rest[consumed..].trim_start();
        }
    }

    let name = collapse_whitespace(rest)
        .trim_matches(|c: char| c.is_whitespace() || NAME_EDGE_PUNCTUATION.contains(&c))
        .to_string();

    let ingredient_name = if name.is_empty() {
        original.to_string()
    } else {
        name
    };

    ParsedIngredient {
        quantity,
        unit,
        ingredient_name,
        notes: join_notes(notes),
    }
}

fn find_alternate_measurement(text: &str) -> Option<(std::ops::Range<usize>, String)> {
    let caps = ALTERNATE_MEASUREMENT.captures(text)?;
    let whole = caps.get(0)?;
    let alternate = caps.get(1)?;
    Some((whole.range(), alternate.as_str().trim().to_string()))
}

/// Split at the first comma that is not inside parentheses.
fn split_top_level_comma(line: &str) -> (&str, Option<&str>) {
    let mut depth: usize = 0;
    for (i, c) in line.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => return (&line[..i], Some(&line[i + 1..])),
            _ => {}
        }
    }
    (line, None)
}

/// Remove every parenthesized span, returning the remaining text and the
/// inner text of each outermost span. Stray `)` are dropped and an unclosed
/// `(` swallows the rest of the line as an aside.
fn extract_parenthesized(text: &str) -> (String, Vec<String>) {
    let mut outside = String::with_capacity(text.len());
    let mut asides = Vec::new();
    let mut current = String::new();
    let mut depth: usize = 0;

    for c in text.chars() {
        match c {
            '(' => {
                if depth > 0 {
                    current.push(c);
                }
                depth += 1;
            }
            ')' => match depth {
                0 => {}
                1 => {
                    depth = 0;
                    asides.push(std::mem::take(&mut current));
                    outside.push(' ');
                }
                _ => {
                    depth -= 1;
                    current.push(c);
                }
            },
            _ if depth > 0 => current.push(c),
            _ => outside.push(c),
        }
    }
    if depth > 0 {
        asides.push(current);
    }

    let asides = asides
        .into_iter()
        .map(|a| collapse_whitespace(&a))
        .filter(|a| !a.is_empty())
        .collect();
    (outside, asides)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn join_notes(notes: Vec<String>) -> String {
    notes
        .into_iter()
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Rebuild a display line from a parsed ingredient.
pub fn format_ingredient(ingredient: &ParsedIngredient) -> String {
    let mut parts = Vec::new();
    if let Some(quantity) = ingredient.quantity {
        parts.push(format_quantity(quantity));
    }
    if !ingredient.unit.is_empty() {
        parts.push(ingredient.unit.clone());
    }
    parts.push(ingredient.ingredient_name.clone());
    parts.join(" ")
}

fn format_quantity(quantity: f64) -> String {
    if quantity.fract() == 0.0 {
        format!("{}", quantity as i64)
    } else {
        let rounded = (quantity * 100.0).round() / 100.0;
        format!("{rounded}")
    }
}
