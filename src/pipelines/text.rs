use crate::model::{Extraction, ExtractionResult};
use crate::url_to_text::text::TextExtractor;
use log::info;

pub const NO_RECIPE_IN_TEXT: &str = "No recipe found in this text.";

/// Extract a recipe from a social media caption or pasted text.
pub async fn process(extractor: &TextExtractor, text: &str) -> ExtractionResult {
    info!("Extracting recipe from {} characters of text", text.chars().count());
    match extractor.extract_from_caption_text(text).await {
        Extraction::Recipe(recipe) => ExtractionResult::success(recipe),
        Extraction::NoRecipe => ExtractionResult::failure(NO_RECIPE_IN_TEXT),
        Extraction::Failed(reason) => ExtractionResult::failure(reason),
    }
}
