use crate::config::ImportConfig;
use crate::error::ImportError;
use crate::model::{Extraction, ParsedRecipe};
use crate::source_name::get_source_name_from_url;
use crate::url_to_text::fetchers::RequestFetcher;
use crate::url_to_text::html::document_language;
use crate::url_to_text::html::extractors::{
    Extractor, HtmlClassExtractor, JsonLdExtractor, MicroDataExtractor, ParsingContext,
};
use crate::url_to_text::html::page_text::clean_page_text;
use crate::url_to_text::text::TextExtractor;
use log::{debug, info, warn};
use scraper::Html;
use url::Url;

/// Extraction tiers, tried in this order until one yields a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// JSON-LD `Recipe` objects
    StructuredData,
    /// Microdata, then recipe-plugin class selectors
    HtmlScrape,
    /// Cleaned page text sent to the model
    AiFallback,
}

pub const TIERS: [Tier; 3] = [Tier::StructuredData, Tier::HtmlScrape, Tier::AiFallback];

/// Fetch a recipe page and run the extraction tiers over it.
///
/// Fetch failures end the import immediately. Tier outcomes never do: a tier
/// that finds nothing or fails to parse hands over to the next one. When no
/// tier produces a recipe, the outcome of the last tier decides between
/// [`ImportError::NoRecipeFound`] and [`ImportError::ExtractionFailed`].
pub struct UrlPipeline {
    fetcher: RequestFetcher,
    ai: Option<TextExtractor>,
    max_page_text_chars: usize,
}

impl UrlPipeline {
    pub fn new(fetcher: RequestFetcher, ai: Option<TextExtractor>) -> Self {
        UrlPipeline {
            fetcher,
            ai,
            max_page_text_chars: ImportConfig::default().max_page_text_chars,
        }
    }

    /// Build the fetcher and the default AI provider from configuration. A
    /// provider that cannot be created (usually a missing API key) disables
    /// the AI tier rather than failing the import.
    pub fn from_config(config: &ImportConfig) -> Result<Self, ImportError> {
        let fetcher = RequestFetcher::new(Some(config.fetch_timeout()))?;
        let ai = match TextExtractor::from_config(config) {
            Ok(ai) => Some(ai),
            Err(e) => {
                warn!("AI fallback disabled: {e}");
                None
            }
        };
        Ok(Self::new(fetcher, ai).with_max_page_text_chars(config.max_page_text_chars))
    }

    pub fn with_max_page_text_chars(mut self, max_chars: usize) -> Self {
        self.max_page_text_chars = max_chars;
        self
    }

    pub async fn process(&self, url: &str) -> Result<ParsedRecipe, ImportError> {
        let url = validate_url(url)?;
        let html = self.fetcher.fetch(url.as_str()).await?;

        let mut last_outcome = Extraction::NoRecipe;
        for tier in TIERS {
            let outcome = match tier {
                Tier::StructuredData => structured_data(&html, url.as_str()),
                Tier::HtmlScrape => html_scrape(&html, url.as_str()),
                Tier::AiFallback => self.ai_fallback(&html, url.as_str()).await,
            };
            match outcome {
                Extraction::Recipe(recipe) => {
                    info!("Recipe '{}' extracted by tier {tier:?}", recipe.title);
                    return Ok(finalize(recipe, &url));
                }
                Extraction::NoRecipe => debug!("Tier {tier:?} found no recipe"),
                Extraction::Failed(ref reason) => warn!("Tier {tier:?} failed: {reason}"),
            }
            last_outcome = outcome;
        }

        match last_outcome {
            Extraction::Failed(reason) => Err(ImportError::ExtractionFailed(reason)),
            _ => Err(ImportError::NoRecipeFound),
        }
    }

    async fn ai_fallback(&self, html: &str, url: &str) -> Extraction {
        let Some(ai) = &self.ai else {
            debug!("No AI provider configured, skipping the AI tier");
            return Extraction::NoRecipe;
        };
        let (text, language) = page_text(html, self.max_page_text_chars);
        match ai.extract_from_page_text(&text, url).await {
            Extraction::Recipe(mut recipe) => {
                if recipe.language.is_none() {
                    recipe.language = language;
                }
                Extraction::Recipe(recipe)
            }
            other => other,
        }
    }
}

fn validate_url(raw: &str) -> Result<Url, ImportError> {
    let url = Url::parse(raw.trim()).map_err(|e| ImportError::InvalidUrl(format!("{raw}: {e}")))?;
    match url.scheme() {
        "http" | "https" if url.host_str().is_some() => Ok(url),
        _ => Err(ImportError::InvalidUrl(format!(
            "{raw}: only http and https links can be imported"
        ))),
    }
}

fn run_extractors(html: &str, url: &str, extractors: &[&dyn Extractor]) -> Extraction {
    let context = ParsingContext::new(url, html);
    let mut outcome = Extraction::NoRecipe;
    for extractor in extractors {
        match extractor.parse(&context) {
            Extraction::Recipe(recipe) => {
                debug!("{} extractor produced a recipe", extractor.name());
                return Extraction::Recipe(recipe);
            }
            Extraction::Failed(reason) => outcome = Extraction::Failed(reason),
            Extraction::NoRecipe => {}
        }
    }
    outcome
}

fn structured_data(html: &str, url: &str) -> Extraction {
    run_extractors(html, url, &[&JsonLdExtractor])
}

fn html_scrape(html: &str, url: &str) -> Extraction {
    run_extractors(html, url, &[&MicroDataExtractor, &HtmlClassExtractor])
}

/// Cleaned text and declared language of the page. The parsed document is
/// dropped before returning, so nothing non-`Send` is held across the model
/// call.
fn page_text(html: &str, max_chars: usize) -> (String, Option<String>) {
    let document = Html::parse_document(html);
    (clean_page_text(&document, max_chars), document_language(&document))
}

fn finalize(mut recipe: ParsedRecipe, url: &Url) -> ParsedRecipe {
    recipe.source_url = url.to_string();
    recipe.source_name = get_source_name_from_url(url.as_str());
    recipe.image_url = recipe
        .image_url
        .and_then(|image| url.join(image.trim()).ok())
        .map(|image| image.to_string());
    recipe.normalize()
}
