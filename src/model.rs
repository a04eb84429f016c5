use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const UNTITLED_RECIPE: &str = "Untitled Recipe";
pub const MAX_TAGS: usize = 10;
pub const MAX_TAG_LEN: usize = 30;

/// A single ingredient line split into its parts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedIngredient {
    pub quantity: Option<f64>,
    pub unit: String,
    pub ingredient_name: String,
    pub notes: String,
}

/// Normalized recipe produced by every import path (URL, photo, caption).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedRecipe {
    pub title: String,
    pub description: String,
    /// Steps joined by newlines, without numbering.
    pub instructions: String,
    pub prep_time_minutes: Option<u32>,
    pub cook_time_minutes: Option<u32>,
    pub servings: Option<u32>,
    pub language: Option<String>,
    pub tags: Vec<String>,
    pub ingredients: Vec<ParsedIngredient>,
    pub source_url: String,
    pub source_name: String,
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
}

impl Default for ParsedRecipe {
    fn default() -> Self {
        ParsedRecipe {
            title: UNTITLED_RECIPE.to_string(),
            description: String::new(),
            instructions: String::new(),
            prep_time_minutes: None,
            cook_time_minutes: None,
            servings: None,
            language: None,
            tags: Vec::new(),
            ingredients: Vec::new(),
            source_url: String::new(),
            source_name: String::new(),
            image_url: None,
        }
    }
}

impl ParsedRecipe {
    /// Enforce the record invariants. Applied to every recipe leaving a tier,
    /// since model output in particular cannot be trusted to respect them.
    pub fn normalize(mut self) -> Self {
        let title = self.title.trim();
        self.title = if title.is_empty() {
            UNTITLED_RECIPE.to_string()
        } else {
            title.to_string()
        };
        self.description = self.description.trim().to_string();
        self.instructions = self.instructions.trim().to_string();
        self.servings = self.servings.filter(|s| *s > 0);
        self.prep_time_minutes = self.prep_time_minutes.filter(|m| *m > 0);
        self.cook_time_minutes = self.cook_time_minutes.filter(|m| *m > 0);
        self.language = self.language.as_deref().and_then(normalize_language);
        self.tags = normalize_tags(self.tags);
        self.image_url = self.image_url.filter(|u| !u.trim().is_empty());
        for ingredient in &mut self.ingredients {
            ingredient.quantity = ingredient.quantity.filter(|q| q.is_finite() && *q > 0.0);
            ingredient.unit = ingredient.unit.trim().to_lowercase();
        }
        self.ingredients
            .retain(|ingredient| !ingredient.ingredient_name.trim().is_empty());
        self
    }
}

/// Reduce a language tag like `en-US` or `NL` to a lowercase two-letter code.
pub fn normalize_language(lang: &str) -> Option<String> {
    let primary = lang.trim().split(['-', '_']).next()?.to_ascii_lowercase();
    if primary.len() == 2 && primary.bytes().all(|b| b.is_ascii_lowercase()) {
        Some(primary)
    } else {
        None
    }
}

/// Lowercase, dedupe and cap tags, keeping first-seen order.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for tag in tags {
        let tag = tag.as_ref().trim().to_lowercase();
        if tag.is_empty() || tag.chars().count() > MAX_TAG_LEN {
            continue;
        }
        if seen.insert(tag.clone()) {
            out.push(tag);
            if out.len() == MAX_TAGS {
                break;
            }
        }
    }
    out
}

/// Result of one extraction attempt. "No recipe" and "failed" are ordinary
/// outcomes so callers can decide between falling through and giving up.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    Recipe(ParsedRecipe),
    /// The content was understood and holds no recipe
    NoRecipe,
    /// The content could not be processed (malformed data, model or network failure)
    Failed(String),
}

impl Extraction {
    pub fn is_recipe(&self) -> bool {
        matches!(self, Extraction::Recipe(_))
    }
}

/// Outcome of the photo and caption entry points. Exactly one of `data` and
/// `error` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ParsedRecipe>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExtractionResult {
    pub fn success(recipe: ParsedRecipe) -> Self {
        ExtractionResult {
            data: Some(recipe),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        ExtractionResult {
            data: None,
            error: Some(message.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.data.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_defaults_title() {
        let recipe = ParsedRecipe {
            title: "   ".to_string(),
            ..Default::default()
        }
        .normalize();
        assert_eq!(recipe.title, UNTITLED_RECIPE);
    }

    #[test]
    fn test_normalize_language() {
        assert_eq!(normalize_language("en-US"), Some("en".to_string()));
        assert_eq!(normalize_language("NL"), Some("nl".to_string()));
        assert_eq!(normalize_language("eng"), None);
        assert_eq!(normalize_language(""), None);
        assert_eq!(normalize_language("1a"), None);
    }

    #[test]
    fn test_normalize_tags_caps_and_dedupes() {
        let tags = normalize_tags([
            "Dinner",
            "dinner",
            " Quick ",
            "",
            "a tag that is definitely longer than thirty characters",
            "a", "b", "c", "d", "e", "f", "g", "h", "i",
        ]);
        assert_eq!(tags.len(), MAX_TAGS);
        assert_eq!(tags[0], "dinner");
        assert_eq!(tags[1], "quick");
        assert!(!tags.iter().any(|t| t.len() > MAX_TAG_LEN));
    }

    #[test]
    fn test_normalize_drops_zero_quantities_and_servings() {
        let recipe = ParsedRecipe {
            servings: Some(0),
            ingredients: vec![ParsedIngredient {
                quantity: Some(0.0),
                unit: "Cups".to_string(),
                ingredient_name: "flour".to_string(),
                notes: String::new(),
            }],
            ..Default::default()
        }
        .normalize();
        assert_eq!(recipe.servings, None);
        assert_eq!(recipe.ingredients[0].quantity, None);
        assert_eq!(recipe.ingredients[0].unit, "cups");
    }

    #[test]
    fn test_image_url_serialized_camel_case() {
        let recipe = ParsedRecipe {
            image_url: Some("https://example.com/a.jpg".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&recipe).unwrap();
        assert_eq!(json["imageUrl"], "https://example.com/a.jpg");
    }

    #[test]
    fn test_extraction_result_serializes_one_side() {
        let json = serde_json::to_value(ExtractionResult::failure("nope")).unwrap();
        assert_eq!(json, serde_json::json!({"error": "nope"}));
    }
}
