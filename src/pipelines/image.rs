use crate::model::{Extraction, ExtractionResult};
use crate::url_to_text::text::TextExtractor;
use log::info;

pub const NO_RECIPE_IN_IMAGE: &str =
    "No recipe found in this image. Try a clearer photo that shows the ingredients and steps.";

/// Extract a recipe from a base64-encoded photo of a recipe card, cookbook
/// page or screen.
pub async fn process(extractor: &TextExtractor, data: &str, media_type: &str) -> ExtractionResult {
    info!("Extracting recipe from {media_type} photo");
    match extractor.extract_from_photo(data, media_type).await {
        Extraction::Recipe(recipe) => ExtractionResult::success(recipe),
        Extraction::NoRecipe => ExtractionResult::failure(NO_RECIPE_IN_IMAGE),
        Extraction::Failed(reason) => ExtractionResult::failure(reason),
    }
}
