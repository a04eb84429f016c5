pub mod builder;
pub mod config;
pub mod error;
pub mod model;
pub mod parsers;
pub mod pipelines;
pub mod providers;
pub mod source_name;
pub mod url_to_text;

pub use builder::{InputSource, RecipeImporter, RecipeImporterBuilder};
pub use config::{load_config, ImportConfig, ProviderConfig};
pub use error::ImportError;
pub use model::{Extraction, ExtractionResult, ParsedIngredient, ParsedRecipe};
pub use parsers::{parse_duration, parse_fraction, parse_ingredient};
pub use pipelines::UrlPipeline;
pub use providers::{LlmProvider, ModelInput, ProviderKind};
pub use source_name::{get_instagram_handle, get_source_name_from_url};
pub use url_to_text::text::TextExtractor;

/// Import a recipe from a web page using configuration from
/// `recipe-import.toml` and the environment.
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), recipe_import::ImportError> {
/// let recipe = recipe_import::parse_recipe_url("https://www.seriouseats.com/some-recipe").await?;
/// println!("{} ({} ingredients)", recipe.title, recipe.ingredients.len());
/// # Ok(())
/// # }
/// ```
pub async fn parse_recipe_url(url: &str) -> Result<ParsedRecipe, ImportError> {
    let config = ImportConfig::load()?;
    UrlPipeline::from_config(&config)?.process(url).await
}

/// Extract a recipe from a base64-encoded photo.
pub async fn extract_from_photo(data: &str, media_type: &str) -> ExtractionResult {
    match configured_extractor() {
        Ok(extractor) => pipelines::image::process(&extractor, data, media_type).await,
        Err(e) => ExtractionResult::failure(e.to_string()),
    }
}

/// Extract a recipe from a social media caption or pasted text.
pub async fn extract_from_caption_text(text: &str) -> ExtractionResult {
    match configured_extractor() {
        Ok(extractor) => pipelines::text::process(&extractor, text).await,
        Err(e) => ExtractionResult::failure(e.to_string()),
    }
}

fn configured_extractor() -> Result<TextExtractor, ImportError> {
    let config = ImportConfig::load()?;
    TextExtractor::from_config(&config)
}
