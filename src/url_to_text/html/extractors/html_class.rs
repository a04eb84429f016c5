use super::{element_text, first_integer, Extractor, ParsingContext, ScrapedRecipe};
use crate::model::Extraction;
use crate::parsers::parse_duration;
use log::debug;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

/// Class names used by the common WordPress recipe card plugins (WP Recipe
/// Maker, Tasty Recipes, Mediavine Create, WPZoom, ...) and generic themes.
struct ClassMatchers {
    title: &'static [&'static str],
    description: &'static [&'static str],
    ingredients: &'static [&'static str],
    instructions: &'static [&'static str],
    prep_time: &'static [&'static str],
    cook_time: &'static [&'static str],
    servings: &'static [&'static str],
    image: &'static [&'static str],
}

const MATCHERS: ClassMatchers = ClassMatchers {
    title: &[
        "wprm-recipe-name",
        "tasty-recipes-title",
        "mv-create-title",
        "wpzoom-recipe-card-title",
        "recipe-card-title",
        "recipe-name",
        "recipe-title",
        "recipe_name",
    ],
    description: &[
        "wprm-recipe-summary",
        "tasty-recipes-description",
        "mv-create-description",
        "wpzoom-recipe-summary",
        "recipe-summary",
        "recipe-description",
        "recipe_description",
    ],
    ingredients: &[
        "wprm-recipe-ingredients-container",
        "wprm-recipe-ingredient",
        "tasty-recipes-ingredients",
        "mv-create-ingredients",
        "wpzoom-recipe-ingredients",
        "recipe-card-ingredients",
        "structured-ingredients",
        "recipe-ingredients",
        "recipe-ingredient-list",
        "recipe_ingredients",
        "ingredients-list",
    ],
    instructions: &[
        "wprm-recipe-instructions-container",
        "wprm-recipe-instruction",
        "tasty-recipes-instructions",
        "mv-create-instructions",
        "wpzoom-recipe-instructions",
        "recipe-card-instructions",
        "structured-instructions",
        "recipe-instructions",
        "recipe-instruction-list",
        "recipe_instructions",
        "recipe-directions",
        "directions",
        "bereiding",
        "zubereitung",
    ],
    prep_time: &[
        "wprm-recipe-prep_time-container",
        "wprm-recipe-prep-time",
        "tasty-recipes-prep-time",
        "mv-create-time-prep",
        "recipe-prep-time",
        "prep-time",
    ],
    cook_time: &[
        "wprm-recipe-cook_time-container",
        "wprm-recipe-cook-time",
        "tasty-recipes-cook-time",
        "mv-create-time-active",
        "recipe-cook-time",
        "cook-time",
    ],
    servings: &[
        "wprm-recipe-servings",
        "tasty-recipes-yield",
        "mv-create-yield",
        "wpzoom-recipe-servings",
        "recipe-servings",
        "recipe-yield",
    ],
    image: &[
        "wprm-recipe-image",
        "tasty-recipes-image",
        "mv-create-image",
        "recipe-image",
    ],
};

/// Substrings tried when none of the exact classes are present.
const FUZZY_INGREDIENTS: &[&str] = &["ingredient", "ingrediënt", "zutat"];
const FUZZY_INSTRUCTIONS: &[&str] = &["instruction", "direction", "method", "preparation"];

static LIST_ITEMS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("li, p").expect("Invalid list item selector"));

static IMG: LazyLock<Selector> = LazyLock::new(|| Selector::parse("img").expect("Invalid img selector"));

static HOURS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+)\s*(?:h|hr|hrs|hour|hours|uur|std|stunde|stunden|heure|heures)\b")
        .expect("Invalid hours regex")
});

static MINUTES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+)\s*(?:m|min|mins|minute|minutes|minuut|minuten)\b")
        .expect("Invalid minutes regex")
});

pub struct HtmlClassExtractor;

impl HtmlClassExtractor {
    fn select_class<'a>(&self, document: &'a Html, selector: &str) -> Vec<ElementRef<'a>> {
        match Selector::parse(selector) {
            Ok(selector) => document.select(&selector).collect(),
            Err(_) => Vec::new(),
        }
    }

    fn find_text(&self, document: &Html, classes: &[&str]) -> Option<String> {
        classes.iter().find_map(|class_name| {
            self.select_class(document, &format!(".{class_name}"))
                .into_iter()
                .map(element_text)
                .find(|text| !text.is_empty())
        })
    }

    /// Lines of the first matching container: its `li`/`p` children when it
    /// has any, otherwise the element's own text lines. A class that marks the
    /// items themselves (e.g. `wprm-recipe-ingredient`) yields one line each.
    fn find_items(&self, document: &Html, classes: &[&str], fuzzy: &[&str]) -> Vec<String> {
        let selectors = classes
            .iter()
            .map(|class_name| format!(".{class_name}"))
            .chain(fuzzy.iter().map(|pattern| format!("[class*='{pattern}']")));

        for selector in selectors {
            let mut items = Vec::new();
            for element in self.select_class(document, &selector) {
                let children: Vec<_> = element
                    .select(&LIST_ITEMS)
                    .filter(|item| item.select(&LIST_ITEMS).next().is_none())
                    .map(element_text)
                    .filter(|text| !text.is_empty())
                    .collect();
                if children.is_empty() {
                    items.extend(
                        element
                            .text()
                            .flat_map(str::lines)
                            .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
                            .filter(|line| !line.is_empty()),
                    );
                } else {
                    items.extend(children);
                }
            }
            if !items.is_empty() {
                debug!("Found {} items using selector: {selector}", items.len());
                return items;
            }
        }
        Vec::new()
    }

    fn find_time(&self, document: &Html, classes: &[&str]) -> Option<u32> {
        classes.iter().find_map(|class_name| {
            self.select_class(document, &format!(".{class_name}"))
                .into_iter()
                .find_map(|el| {
                    el.value()
                        .attr("datetime")
                        .or_else(|| el.value().attr("content"))
                        .and_then(|iso| parse_duration(Some(iso)))
                        .or_else(|| parse_time_text(&element_text(el)))
                })
        })
    }

    fn find_image(&self, document: &Html) -> Option<String> {
        MATCHERS.image.iter().find_map(|class_name| {
            self.select_class(document, &format!(".{class_name}"))
                .into_iter()
                .find_map(|el| {
                    let img = if el.value().name() == "img" {
                        Some(el)
                    } else {
                        el.select(&IMG).next()
                    }?;
                    ["data-src", "src"]
                        .iter()
                        .find_map(|attr| img.value().attr(attr))
                        .map(|src| src.trim().to_string())
                        .filter(|src| !src.is_empty() && !src.starts_with("data:"))
                })
        })
    }
}

/// Minutes from human-readable times such as "1 hr 30 mins", "45 minuten" or
/// an ISO-8601 duration.
fn parse_time_text(text: &str) -> Option<u32> {
    if let Some(minutes) = parse_duration(Some(text.trim())) {
        return Some(minutes);
    }
    let hours = sum_captures(&HOURS, text)?;
    let minutes = sum_captures(&MINUTES, text)?;
    let total = hours.checked_mul(60)?.checked_add(minutes)?;
    (total > 0).then_some(total)
}

/// `None` when the numbers overflow.
fn sum_captures(pattern: &Regex, text: &str) -> Option<u32> {
    pattern
        .captures_iter(text)
        .filter_map(|c| c[1].parse::<u32>().ok())
        .try_fold(0u32, |acc, n| acc.checked_add(n))
}

impl Extractor for HtmlClassExtractor {
    fn name(&self) -> &'static str {
        "html-class"
    }

    fn parse(&self, context: &ParsingContext) -> Extraction {
        debug!("Attempting to extract recipe using HTML class extractor");
        let document = &context.document;

        let scraped = ScrapedRecipe {
            title: self.find_text(document, MATCHERS.title),
            description: self.find_text(document, MATCHERS.description),
            ingredients: self.find_items(document, MATCHERS.ingredients, FUZZY_INGREDIENTS),
            steps: self.find_items(document, MATCHERS.instructions, FUZZY_INSTRUCTIONS),
            prep_time_minutes: self.find_time(document, MATCHERS.prep_time),
            cook_time_minutes: self.find_time(document, MATCHERS.cook_time),
            servings: self
                .find_text(document, MATCHERS.servings)
                .and_then(|text| first_integer(&text)),
            tags: Vec::new(),
            image_url: self.find_image(document),
        };
        scraped.into_extraction(context)
    }
}
