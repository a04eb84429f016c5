use crate::config::ImportConfig;
use crate::error::ImportError;
use crate::model::{Extraction, ParsedIngredient, ParsedRecipe};
use crate::parsers::{parse_fraction, parse_ingredient};
use crate::providers::{
    caption_message, page_text_message, LlmProvider, ModelInput, ProviderFactory,
    RECIPE_EXTRACTION_PROMPT,
};
use crate::source_name::get_source_name_from_url;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use log::{debug, info, warn};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use std::time::Duration;

/// Image types the vision models accept.
pub const SUPPORTED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp"];

/// Value of `"error"` the prompt asks for when the input holds no recipe.
const NO_RECIPE_SENTINEL: &str = "no_recipe";

static CODE_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^```[a-zA-Z]*\s*(.*?)\s*```$").expect("Invalid code fence regex")
});

/// Recipe extraction through a generative model, for page text the
/// structured tiers could not read, photos and captions.
///
/// Every entry point returns an [`Extraction`]: model errors, timeouts and
/// malformed replies become [`Extraction::Failed`], the model's `no_recipe`
/// sentinel becomes [`Extraction::NoRecipe`].
pub struct TextExtractor {
    provider: Box<dyn LlmProvider>,
    timeout: Duration,
}

impl TextExtractor {
    pub fn new(provider: Box<dyn LlmProvider>, timeout: Duration) -> Self {
        TextExtractor { provider, timeout }
    }

    /// Build from the configured default provider.
    pub fn from_config(config: &ImportConfig) -> Result<Self, ImportError> {
        let provider = ProviderFactory::get_default_provider(config)
            .map_err(|e| ImportError::Provider(e.to_string()))?;
        Ok(Self::new(provider, config.ai_timeout()))
    }

    pub fn provider_name(&self) -> &str {
        self.provider.provider_name()
    }

    pub async fn extract_from_page_text(&self, text: &str, url: &str) -> Extraction {
        if text.trim().is_empty() {
            debug!("Page text is empty, nothing to send to the model");
            return Extraction::NoRecipe;
        }
        let input = ModelInput::Text(page_text_message(text, url));
        match self.run(&input).await {
            Extraction::Recipe(mut recipe) => {
                recipe.source_url = url.to_string();
                recipe.source_name = get_source_name_from_url(url);
                Extraction::Recipe(recipe)
            }
            other => other,
        }
    }

    /// `data` is base64 image data, optionally as a `data:` URL.
    pub async fn extract_from_photo(&self, data: &str, media_type: &str) -> Extraction {
        let media_type = match media_type.trim().to_ascii_lowercase().as_str() {
            "image/jpg" => "image/jpeg".to_string(),
            other => other.to_string(),
        };
        if !SUPPORTED_IMAGE_TYPES.contains(&media_type.as_str()) {
            warn!("Rejecting photo with unsupported media type {media_type}");
            return Extraction::Failed(format!(
                "Unsupported image type '{media_type}'. Use a JPEG, PNG or WebP image."
            ));
        }

        let data = strip_data_url(data.trim());
        match STANDARD.decode(data) {
            Ok(bytes) if !bytes.is_empty() => {
                debug!("Sending {} byte {media_type} image to the model", bytes.len())
            }
            Ok(_) => return Extraction::Failed("The image is empty".to_string()),
            Err(e) => return Extraction::Failed(format!("The image data is not valid base64: {e}")),
        }

        let input = ModelInput::Image {
            data: data.to_string(),
            media_type,
        };
        self.run(&input).await
    }

    pub async fn extract_from_caption_text(&self, text: &str) -> Extraction {
        if text.trim().is_empty() {
            return Extraction::NoRecipe;
        }
        self.run(&ModelInput::Text(caption_message(text))).await
    }

    async fn run(&self, input: &ModelInput) -> Extraction {
        info!("Asking {} to extract a recipe", self.provider.provider_name());
        let call = self.provider.complete(RECIPE_EXTRACTION_PROMPT, input);
        let reply = match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(reply)) => reply,
            Ok(Err(e)) => {
                warn!("Model call failed: {e}");
                return Extraction::Failed(format!("AI extraction failed: {e}"));
            }
            Err(_) => {
                warn!("Model call timed out after {:?}", self.timeout);
                return Extraction::Failed(format!(
                    "The AI model did not respond within {} seconds",
                    self.timeout.as_secs()
                ));
            }
        };
        parse_model_response(&reply)
    }
}

fn strip_data_url(data: &str) -> &str {
    match data.split_once(";base64,") {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        _ => data,
    }
}

/// Remove a surrounding markdown code fence, if any.
fn strip_code_fences(reply: &str) -> &str {
    let reply = reply.trim();
    match CODE_FENCE.captures(reply).and_then(|c| c.get(1)) {
        Some(inner) => inner.as_str(),
        None => reply,
    }
}

/// Interpret the model's reply. Never panics on untrusted output.
pub(crate) fn parse_model_response(reply: &str) -> Extraction {
    let body = strip_code_fences(reply);
    let json: Value = match serde_json::from_str(body) {
        Ok(json) => json,
        Err(e) => {
            // Some models wrap the object in prose despite the prompt
            let embedded = body
                .find('{')
                .zip(body.rfind('}'))
                .filter(|(start, end)| start < end)
                .and_then(|(start, end)| serde_json::from_str(&body[start..=end]).ok());
            match embedded {
                Some(json) => json,
                None => {
                    warn!("Model reply is not JSON: {e}");
                    return Extraction::Failed(format!("The AI response could not be read: {e}"));
                }
            }
        }
    };

    let Some(obj) = json.as_object() else {
        return Extraction::Failed("The AI response was not a JSON object".to_string());
    };

    match obj.get("error") {
        None | Some(Value::Null) => {}
        Some(Value::String(error)) if error.trim().is_empty() => {}
        Some(Value::String(error)) if error.trim() == NO_RECIPE_SENTINEL => {
            debug!("Model reported no recipe");
            return Extraction::NoRecipe;
        }
        Some(error) => {
            warn!("Model reported an error: {error}");
            let message = error.as_str().map_or_else(|| error.to_string(), str::to_string);
            return Extraction::Failed(format!("The AI could not extract a recipe: {message}"));
        }
    }

    let ingredients: Vec<ParsedIngredient> = obj
        .get("ingredients")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(ingredient_from_value).collect())
        .unwrap_or_default();

    let instructions = match obj.get("instructions") {
        Some(Value::Array(steps)) => steps
            .iter()
            .filter_map(|step| match step {
                Value::String(s) => Some(s.trim().to_string()),
                Value::Object(o) => o.get("text").and_then(Value::as_str).map(|s| s.trim().to_string()),
                _ => None,
            })
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\n"),
        Some(Value::String(text)) => text.trim().to_string(),
        _ => String::new(),
    };

    let title = string_field(obj.get("title"));
    if title.is_empty() && ingredients.is_empty() && instructions.is_empty() {
        return Extraction::NoRecipe;
    }

    let recipe = ParsedRecipe {
        title,
        description: string_field(obj.get("description")),
        instructions,
        prep_time_minutes: minutes_field(obj.get("prep_time_minutes")),
        cook_time_minutes: minutes_field(obj.get("cook_time_minutes")),
        servings: minutes_field(obj.get("servings")),
        language: obj.get("language").and_then(Value::as_str).map(str::to_string),
        tags: obj
            .get("tags")
            .and_then(Value::as_array)
            .map(|tags| tags.iter().filter_map(Value::as_str).map(str::to_string).collect())
            .unwrap_or_default(),
        ingredients,
        ..Default::default()
    };
    Extraction::Recipe(recipe.normalize())
}

fn string_field(value: Option<&Value>) -> String {
    value
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// Non-negative whole numbers, given as a JSON number or a numeric string.
fn minutes_field(value: Option<&Value>) -> Option<u32> {
    match value? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f.round() as u64))
            .and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    }
}

/// Ingredient lines go through the line parser; pre-split objects are
/// accepted as given.
fn ingredient_from_value(value: &Value) -> Option<ParsedIngredient> {
    match value {
        Value::String(line) if !line.trim().is_empty() => Some(parse_ingredient(line)),
        Value::Object(obj) => {
            let name = obj
                .get("ingredient_name")
                .or_else(|| obj.get("name"))
                .and_then(Value::as_str)?;
            if name.trim().is_empty() {
                return None;
            }
            let quantity = match obj.get("quantity") {
                Some(Value::Number(n)) => n.as_f64(),
                Some(Value::String(s)) => Some(parse_fraction(s)),
                _ => None,
            };
            Some(ParsedIngredient {
                quantity,
                unit: string_field(obj.get("unit")),
                ingredient_name: name.trim().to_string(),
                notes: string_field(obj.get("notes")),
            })
        }
        _ => None,
    }
}
