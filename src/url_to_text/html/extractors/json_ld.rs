use super::{clean_step, first_integer, split_tags, Extractor, ParsingContext};
use crate::model::{normalize_language, normalize_tags, Extraction, ParsedRecipe, UNTITLED_RECIPE};
use crate::parsers::{parse_duration_value, parse_ingredient};
use crate::source_name::get_source_name_from_url;
use crate::url_to_text::html::document_language;
use crate::url_to_text::html::entities::decode_entities;
use crate::url_to_text::html::sanitize::parse_json_ld;
use log::{debug, warn};
use scraper::Selector;
use serde_json::Value;
use std::sync::LazyLock;

static JSON_LD_SCRIPT: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"script[type="application/ld+json"]"#).expect("Invalid JSON-LD selector")
});

pub struct JsonLdExtractor;

impl JsonLdExtractor {
    fn convert_to_recipe(&self, recipe: &Value, context: &ParsingContext) -> ParsedRecipe {
        let title = recipe
            .get("name")
            .and_then(Value::as_str)
            .map(decode_entities)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| UNTITLED_RECIPE.to_string());

        let description = match recipe.get("description") {
            Some(Value::String(d)) => decode_entities(d),
            Some(Value::Object(obj)) => obj
                .get("text")
                .and_then(Value::as_str)
                .map(decode_entities)
                .unwrap_or_default(),
            _ => String::new(),
        };

        let mut steps = Vec::new();
        if let Some(instructions) = recipe.get("recipeInstructions") {
            collect_steps(instructions, &mut steps);
        }
        let instructions = steps
            .iter()
            .map(|step| clean_step(&decode_entities(step)))
            .filter(|step| !step.is_empty())
            .collect::<Vec<_>>()
            .join("\n");

        let ingredients = recipe
            .get("recipeIngredient")
            .or_else(|| recipe.get("ingredients"))
            .map(string_list)
            .unwrap_or_default()
            .iter()
            .map(|line| decode_entities(line))
            .filter(|line| !line.trim().is_empty())
            .map(|line| parse_ingredient(&line))
            .collect();

        let mut tags = Vec::new();
        for key in ["recipeCategory", "recipeCuisine", "keywords"] {
            if let Some(value) = recipe.get(key) {
                for text in string_list(value) {
                    tags.extend(split_tags(&decode_entities(&text)));
                }
            }
        }

        let language = document_language(&context.document).or_else(|| {
            recipe
                .get("inLanguage")
                .and_then(Value::as_str)
                .and_then(normalize_language)
        });

        ParsedRecipe {
            title,
            description,
            instructions,
            prep_time_minutes: parse_duration_value(recipe.get("prepTime")),
            cook_time_minutes: parse_duration_value(recipe.get("cookTime")),
            servings: recipe.get("recipeYield").and_then(parse_yield),
            language,
            tags: normalize_tags(tags),
            ingredients,
            source_url: context.url.clone(),
            source_name: get_source_name_from_url(&context.url),
            image_url: recipe.get("image").and_then(first_image_url),
        }
    }
}

impl Extractor for JsonLdExtractor {
    fn name(&self) -> &'static str {
        "json-ld"
    }

    fn parse(&self, context: &ParsingContext) -> Extraction {
        debug!("JsonLdExtractor: Starting parse for URL: {}", context.url);

        let mut parse_failures = 0;
        for script in context.document.select(&JSON_LD_SCRIPT) {
            let raw = script.text().collect::<String>();
            if raw.trim().is_empty() {
                continue;
            }
            let json = match parse_json_ld(&raw) {
                Ok(json) => json,
                Err(e) => {
                    warn!("JsonLdExtractor: Unparseable JSON-LD block: {e}");
                    parse_failures += 1;
                    continue;
                }
            };

            let Some(recipe) = find_recipe(&json) else {
                continue;
            };
            let parsed = self.convert_to_recipe(recipe, context);
            if parsed.ingredients.is_empty() && parsed.instructions.is_empty() {
                debug!("JsonLdExtractor: Recipe object has no ingredients or instructions");
                continue;
            }
            debug!(
                "JsonLdExtractor: Found recipe '{}' with {} ingredients",
                parsed.title,
                parsed.ingredients.len()
            );
            return Extraction::Recipe(parsed);
        }

        if parse_failures > 0 {
            Extraction::Failed(format!("{parse_failures} JSON-LD block(s) could not be parsed"))
        } else {
            Extraction::NoRecipe
        }
    }
}

fn is_recipe_type(value: &Value) -> bool {
    let matches = |t: &str| {
        let t = t.rsplit('/').next().unwrap_or(t);
        t.eq_ignore_ascii_case("recipe")
    };
    match value.get("@type") {
        Some(Value::String(t)) => matches(t),
        Some(Value::Array(types)) => types.iter().filter_map(Value::as_str).any(matches),
        _ => false,
    }
}

/// Depth-first search for the first Recipe node, in document order.
fn find_recipe(value: &Value) -> Option<&Value> {
    match value {
        Value::Array(items) => items.iter().find_map(find_recipe),
        Value::Object(obj) => {
            if is_recipe_type(value) {
                return Some(value);
            }
            obj.get("@graph").and_then(find_recipe)
        }
        _ => None,
    }
}

fn collect_steps(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::String(text) => out.extend(
            text.lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string),
        ),
        Value::Array(items) => {
            for item in items {
                collect_steps(item, out);
            }
        }
        Value::Object(obj) => {
            if let Some(items) = obj.get("itemListElement") {
                collect_steps(items, out);
            } else if let Some(text) = obj.get("text").or_else(|| obj.get("name")) {
                collect_steps(text, out);
            }
        }
        _ => {}
    }
}

/// Strings held in a field that may be a single string or an array of them.
fn string_list(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => vec![s.clone()],
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

fn parse_yield(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 1.0).map(|f| f as u64))
            .and_then(|n| u32::try_from(n).ok())
            .filter(|n| *n > 0),
        Value::String(s) => first_integer(s),
        Value::Array(items) => items.iter().find_map(parse_yield),
        _ => None,
    }
}

fn first_image_url(value: &Value) -> Option<String> {
    match value {
        Value::String(url) => Some(decode_entities(url.trim())).filter(|u| !u.is_empty()),
        Value::Array(items) => items.iter().find_map(first_image_url),
        Value::Object(obj) => obj
            .get("url")
            .or_else(|| obj.get("contentUrl"))
            .and_then(first_image_url),
        _ => None,
    }
}
