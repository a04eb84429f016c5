use crate::model::{normalize_tags, Extraction, ParsedRecipe};
use crate::parsers::parse_ingredient;
use crate::source_name::get_source_name_from_url;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

mod html_class;
mod json_ld;
mod microdata;

pub use html_class::HtmlClassExtractor;
pub use json_ld::JsonLdExtractor;
pub use microdata::MicroDataExtractor;

use super::document_language;

pub struct ParsingContext {
    pub url: String,
    pub document: Html,
}

impl ParsingContext {
    pub fn new(url: impl Into<String>, html: &str) -> Self {
        ParsingContext {
            url: url.into(),
            document: Html::parse_document(html),
        }
    }
}

pub trait Extractor {
    fn name(&self) -> &'static str;
    fn parse(&self, context: &ParsingContext) -> Extraction;
}

static STEP_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:(?:step|stap|schritt|étape)\s*\d+\s*[.:)\-]?|\d+\s*[.):]|[•\-*▢])\s*")
        .expect("Invalid step marker regex")
});

static FIRST_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("Invalid integer regex"));

static H1: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h1").expect("Invalid h1 selector"));

static OG_TITLE: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"meta[property="og:title"]"#).expect("Invalid og:title selector")
});

/// Whitespace-collapsed text content of an element.
pub(crate) fn element_text(element: ElementRef) -> String {
    element.text().collect::<Vec<_>>().join(" ").split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Drop leading numbering and bullets ("1.", "Step 2:", "•") from a step.
pub(crate) fn clean_step(step: &str) -> String {
    STEP_MARKER.replace(step.trim(), "").trim().to_string()
}

/// The first positive integer in a yield text like "Serves 4-6".
pub(crate) fn first_integer(text: &str) -> Option<u32> {
    FIRST_INTEGER
        .find(text)
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .filter(|n| *n > 0)
}

/// Split category/keyword text on commas and semicolons.
pub(crate) fn split_tags(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split([',', ';'])
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Page title used when a scraped recipe has no explicit name.
pub(crate) fn fallback_title(document: &Html) -> Option<String> {
    document
        .select(&H1)
        .map(element_text)
        .find(|t| !t.is_empty())
        .or_else(|| {
            document
                .select(&OG_TITLE)
                .filter_map(|el| el.value().attr("content"))
                .map(|t| t.trim().to_string())
                .find(|t| !t.is_empty())
        })
}

/// Fields collected by the selector-based scrapers before validation.
#[derive(Debug, Default)]
pub(crate) struct ScrapedRecipe {
    pub title: Option<String>,
    pub description: Option<String>,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub prep_time_minutes: Option<u32>,
    pub cook_time_minutes: Option<u32>,
    pub servings: Option<u32>,
    pub tags: Vec<String>,
    pub image_url: Option<String>,
}

impl ScrapedRecipe {
    /// A scrape needs a title and at least one ingredient or step.
    pub fn into_extraction(self, context: &ParsingContext) -> Extraction {
        let title = self
            .title
            .filter(|t| !t.trim().is_empty())
            .or_else(|| fallback_title(&context.document));
        let Some(title) = title else {
            return Extraction::NoRecipe;
        };

        let ingredients: Vec<_> = self
            .ingredients
            .iter()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .map(parse_ingredient)
            .collect();
        let steps: Vec<_> = self
            .steps
            .iter()
            .map(|s| clean_step(s))
            .filter(|s| !s.is_empty())
            .collect();

        if ingredients.is_empty() && steps.is_empty() {
            return Extraction::NoRecipe;
        }

        Extraction::Recipe(ParsedRecipe {
            title,
            description: self.description.unwrap_or_default(),
            instructions: steps.join("\n"),
            prep_time_minutes: self.prep_time_minutes,
            cook_time_minutes: self.cook_time_minutes,
            servings: self.servings,
            language: document_language(&context.document),
            tags: normalize_tags(self.tags),
            ingredients,
            source_url: context.url.clone(),
            source_name: get_source_name_from_url(&context.url),
            image_url: self.image_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_step() {
        assert_eq!(clean_step("1. Preheat the oven"), "Preheat the oven");
        assert_eq!(clean_step("Step 2: Mix"), "Mix");
        assert_eq!(clean_step("Stap 3 Roer"), "Roer");
        assert_eq!(clean_step("• Stir"), "Stir");
        assert_eq!(clean_step("350 degrees is hot"), "350 degrees is hot");
    }

    #[test]
    fn test_first_integer() {
        assert_eq!(first_integer("Serves 4-6"), Some(4));
        assert_eq!(first_integer("12 cookies"), Some(12));
        assert_eq!(first_integer("a few"), None);
        assert_eq!(first_integer("0"), None);
    }

    #[test]
    fn test_split_tags() {
        let tags: Vec<_> = split_tags("Dinner, Quick;  Vegan,,").collect();
        assert_eq!(tags, vec!["Dinner", "Quick", "Vegan"]);
    }

    #[test]
    fn test_fallback_title_prefers_h1_then_og() {
        let doc = Html::parse_document(
            r#"<html><head><meta property="og:title" content="OG Title"></head><body><h1> Soup </h1></body></html>"#,
        );
        assert_eq!(fallback_title(&doc), Some("Soup".to_string()));

        let doc = Html::parse_document(
            r#"<html><head><meta property="og:title" content="OG Title"></head><body></body></html>"#,
        );
        assert_eq!(fallback_title(&doc), Some("OG Title".to_string()));
    }

    #[test]
    fn test_scrape_without_content_is_no_recipe() {
        let context = ParsingContext::new("https://example.com", "<html><body><h1>Hi</h1></body></html>");
        let scraped = ScrapedRecipe {
            title: Some("Hi".to_string()),
            ..Default::default()
        };
        assert_eq!(scraped.into_extraction(&context), Extraction::NoRecipe);
    }
}
