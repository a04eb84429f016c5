/// The system prompt used for extracting a recipe as JSON.
///
/// Loaded from `prompt.txt` at compile time so it can be edited without
/// dealing with Rust string syntax. The same prompt serves page text, photos
/// and captions; only the user message differs.
pub const RECIPE_EXTRACTION_PROMPT: &str = include_str!("prompt.txt");

/// User message for the page-text fallback.
pub fn page_text_message(text: &str, url: &str) -> String {
    format!("Extract the recipe from this web page.\nURL: {url}\n\n{text}")
}

/// User message for a social media caption or pasted text.
pub fn caption_message(text: &str) -> String {
    format!("Extract the recipe from this text:\n\n{text}")
}
