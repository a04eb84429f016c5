use std::path::{Path, PathBuf};
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::config::ImportConfig;
use crate::model::{ExtractionResult, ParsedRecipe};
use crate::pipelines::{self, UrlPipeline};
use crate::providers::ProviderKind;
use crate::url_to_text::text::TextExtractor;
use crate::ImportError;

/// Represents the input source for a recipe
#[derive(Debug, Clone)]
pub enum InputSource {
    /// Fetch recipe from a URL
    Url(String),
    /// A caption or pasted recipe text
    Text(String),
    /// Base64 image data with its MIME type
    Image { data: String, media_type: String },
    /// Image file read from disk
    ImageFile(PathBuf),
}

/// Builder for configuring and executing recipe imports
#[derive(Debug, Default)]
pub struct RecipeImporterBuilder {
    source: Option<InputSource>,
    provider: Option<ProviderKind>,
    timeout: Option<Duration>,
    api_key: Option<String>,
    model: Option<String>,
    base_url: Option<String>,
}

impl RecipeImporterBuilder {
    /// Set the input source to a URL
    ///
    /// # Example
    /// ```
    /// use recipe_import::RecipeImporter;
    ///
    /// let builder = RecipeImporter::builder()
    ///     .url("https://example.com/recipe");
    /// ```
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.source = Some(InputSource::Url(url.into()));
        self
    }

    /// Set the input source to caption or pasted text
    ///
    /// The model extracts the recipe from the text as written.
    ///
    /// # Example
    /// ```
    /// use recipe_import::RecipeImporter;
    ///
    /// let caption = "Easy pancakes! 250g flour, 2 eggs, 500ml milk. Whisk and fry.";
    /// let builder = RecipeImporter::builder()
    ///     .text(caption);
    /// ```
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.source = Some(InputSource::Text(text.into()));
        self
    }

    /// Set the input source to base64 image data (`image/jpeg`, `image/png`
    /// or `image/webp`)
    pub fn image_base64(mut self, data: impl Into<String>, media_type: impl Into<String>) -> Self {
        self.source = Some(InputSource::Image {
            data: data.into(),
            media_type: media_type.into(),
        });
        self
    }

    /// Set the input source to an image file
    ///
    /// The media type is taken from the file extension.
    ///
    /// # Example
    /// ```
    /// use recipe_import::RecipeImporter;
    ///
    /// let builder = RecipeImporter::builder()
    ///     .image("/path/to/recipe-card.jpg");
    /// ```
    pub fn image(mut self, path: impl AsRef<Path>) -> Self {
        self.source = Some(InputSource::ImageFile(path.as_ref().to_path_buf()));
        self
    }

    /// Set the LLM provider used for the AI tier, photos and captions
    ///
    /// # Example
    /// ```
    /// use recipe_import::{ProviderKind, RecipeImporter};
    ///
    /// let builder = RecipeImporter::builder()
    ///     .url("https://example.com/recipe")
    ///     .provider(ProviderKind::OpenAI);
    /// ```
    pub fn provider(mut self, provider: ProviderKind) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set a timeout for fetching the page
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Set the API key for the LLM provider
    ///
    /// This allows passing the API key directly instead of relying on
    /// environment variables or config files.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the model name for the LLM provider
    ///
    /// # Example
    /// ```
    /// use recipe_import::{ProviderKind, RecipeImporter};
    ///
    /// let builder = RecipeImporter::builder()
    ///     .text("...")
    ///     .provider(ProviderKind::Anthropic)
    ///     .model("claude-sonnet-4-5");
    /// ```
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Point the provider at a proxy or compatible endpoint
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Configuration from file and environment with the builder's overrides
    /// applied on top.
    fn resolve_config(&self) -> Result<ImportConfig, ImportError> {
        let mut config = ImportConfig::load()?;
        if let Some(provider) = self.provider {
            config.default_provider = provider.as_str().to_string();
        }

        let mut provider_config = config.default_provider_config();
        if let Some(key) = &self.api_key {
            provider_config.api_key = Some(key.clone());
        }
        if let Some(model) = &self.model {
            provider_config.model = model.clone();
        }
        if let Some(base_url) = &self.base_url {
            provider_config.base_url = Some(base_url.clone());
        }
        config
            .providers
            .insert(config.default_provider.clone(), provider_config);

        if let Some(timeout) = self.timeout {
            config.fetch_timeout = timeout.as_secs().max(1);
        }
        Ok(config)
    }

    /// Build and execute the recipe import operation
    ///
    /// # Errors
    /// Returns `ImportError` if:
    /// - No input source was specified
    /// - The page could not be fetched
    /// - No tier produced a recipe
    /// - The AI provider could not be created for photo or text input
    ///
    /// # Example
    /// ```no_run
    /// # use recipe_import::RecipeImporter;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let recipe = RecipeImporter::builder()
    ///     .url("https://example.com/recipe")
    ///     .build()
    ///     .await?;
    /// println!("{}", recipe.title);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn build(self) -> Result<ParsedRecipe, ImportError> {
        let source = self.source.clone().ok_or_else(|| {
            ImportError::BuilderError(
                "No input source specified. Use .url(), .text() or .image()".to_string(),
            )
        })?;
        let config = self.resolve_config()?;

        match source {
            InputSource::Url(url) => UrlPipeline::from_config(&config)?.process(&url).await,
            InputSource::Text(text) => {
                if text.trim().is_empty() {
                    return Err(ImportError::BuilderError(
                        "Recipe text cannot be empty".to_string(),
                    ));
                }
                let extractor = TextExtractor::from_config(&config)?;
                into_recipe(pipelines::text::process(&extractor, &text).await)
            }
            InputSource::Image { data, media_type } => {
                let extractor = TextExtractor::from_config(&config)?;
                into_recipe(pipelines::image::process(&extractor, &data, &media_type).await)
            }
            InputSource::ImageFile(path) => {
                let bytes = tokio::fs::read(&path).await.map_err(|e| {
                    ImportError::BuilderError(format!("Failed to read {}: {e}", path.display()))
                })?;
                let data = STANDARD.encode(bytes);
                let extractor = TextExtractor::from_config(&config)?;
                into_recipe(
                    pipelines::image::process(&extractor, &data, media_type_for_path(&path)).await,
                )
            }
        }
    }
}

fn into_recipe(result: ExtractionResult) -> Result<ParsedRecipe, ImportError> {
    match result {
        ExtractionResult {
            data: Some(recipe), ..
        } => Ok(recipe),
        ExtractionResult { error, .. } => Err(ImportError::Extraction(
            error.unwrap_or_else(|| "No recipe found".to_string()),
        )),
    }
}

fn media_type_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Main entry point for the builder API
pub struct RecipeImporter;

impl RecipeImporter {
    /// Creates a new builder for importing recipes
    ///
    /// # Example
    /// ```
    /// use recipe_import::RecipeImporter;
    ///
    /// let builder = RecipeImporter::builder();
    /// ```
    pub fn builder() -> RecipeImporterBuilder {
        RecipeImporterBuilder::default()
    }
}
