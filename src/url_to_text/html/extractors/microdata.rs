use super::{element_text, first_integer, split_tags, Extractor, ParsingContext, ScrapedRecipe};
use crate::model::Extraction;
use crate::parsers::parse_duration;
use log::debug;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

static ITEMSCOPE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("[itemscope][itemtype]").expect("Invalid itemscope selector"));

static STEP_PARTS: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"[itemprop="step"], [itemprop="text"], li"#).expect("Invalid step selector")
});

pub struct MicroDataExtractor;

impl MicroDataExtractor {
    fn find_recipe_container<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>> {
        document.select(&ITEMSCOPE).find(|el| {
            el.value().attr("itemtype").is_some_and(|itemtype| {
                itemtype.contains("schema.org/Recipe")
                    || itemtype.contains("data-vocabulary.org/Recipe")
            })
        })
    }

    /// Properties of `root` itself, skipping those that belong to a nested
    /// item such as the author's `Person`.
    fn itemprop_elements<'a>(&self, root: ElementRef<'a>, prop: &str) -> Vec<ElementRef<'a>> {
        match Selector::parse(&format!(r#"[itemprop="{prop}"]"#)) {
            Ok(selector) => root
                .select(&selector)
                .filter(|el| owning_scope(*el).map_or(true, |scope| scope.id() == root.id()))
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    fn get_itemprop(&self, root: ElementRef, prop: &str) -> Option<String> {
        self.itemprop_elements(root, prop)
            .into_iter()
            .map(element_text)
            .find(|text| !text.is_empty())
    }

    fn get_itemprop_list(&self, root: ElementRef, prop: &str) -> Vec<String> {
        self.itemprop_elements(root, prop)
            .into_iter()
            .map(element_text)
            .filter(|text| !text.is_empty())
            .collect()
    }

    /// `datetime` or `content` attribute first, then the element text.
    fn get_duration(&self, root: ElementRef, prop: &str) -> Option<u32> {
        self.itemprop_elements(root, prop).into_iter().find_map(|el| {
            let value = el
                .value()
                .attr("datetime")
                .or_else(|| el.value().attr("content"))
                .map(str::to_string)
                .unwrap_or_else(|| element_text(el));
            parse_duration(Some(value.trim()))
        })
    }

    fn get_image(&self, root: ElementRef) -> Option<String> {
        self.itemprop_elements(root, "image").into_iter().find_map(|el| {
            let attr = ["src", "content", "href"]
                .iter()
                .find_map(|name| el.value().attr(name))
                .map(|v| v.trim().to_string());
            attr.filter(|v| !v.is_empty())
        })
    }

    fn get_instructions(&self, root: ElementRef) -> Vec<String> {
        let mut steps = Vec::new();
        for prop in ["recipeInstructions", "instructions"] {
            for el in self.itemprop_elements(root, prop) {
                let parts: Vec<_> = el
                    .select(&STEP_PARTS)
                    .filter(|part| part.select(&STEP_PARTS).next().is_none())
                    .map(element_text)
                    .filter(|text| !text.is_empty())
                    .collect();
                if parts.is_empty() {
                    steps.extend(
                        el.text()
                            .flat_map(str::lines)
                            .map(|line| line.trim().to_string())
                            .filter(|line| !line.is_empty()),
                    );
                } else {
                    steps.extend(parts);
                }
            }
            if !steps.is_empty() {
                break;
            }
        }
        steps
    }
}

fn owning_scope(el: ElementRef) -> Option<ElementRef> {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|ancestor| ancestor.value().attr("itemscope").is_some())
}

impl Extractor for MicroDataExtractor {
    fn name(&self) -> &'static str {
        "microdata"
    }

    fn parse(&self, context: &ParsingContext) -> Extraction {
        debug!("Attempting to extract recipe using MicroData extractor");

        let root = match self.find_recipe_container(&context.document) {
            Some(container) => container,
            None => {
                debug!("No MicroData Recipe container, scanning the whole document");
                context.document.root_element()
            }
        };

        let mut ingredients = self.get_itemprop_list(root, "recipeIngredient");
        if ingredients.is_empty() {
            ingredients = self.get_itemprop_list(root, "ingredients");
        }

        let mut tags = Vec::new();
        for prop in ["recipeCategory", "recipeCuisine", "keywords"] {
            for text in self.get_itemprop_list(root, prop) {
                tags.extend(split_tags(&text));
            }
        }

        let scraped = ScrapedRecipe {
            title: self.get_itemprop(root, "name"),
            description: self.get_itemprop(root, "description"),
            ingredients,
            steps: self.get_instructions(root),
            prep_time_minutes: self.get_duration(root, "prepTime"),
            cook_time_minutes: self.get_duration(root, "cookTime"),
            servings: self
                .itemprop_elements(root, "recipeYield")
                .into_iter()
                .find_map(|el| {
                    el.value()
                        .attr("content")
                        .and_then(first_integer)
                        .or_else(|| first_integer(&element_text(el)))
                }),
            tags,
            image_url: self.get_image(root),
        };
        scraped.into_extraction(context)
    }
}
