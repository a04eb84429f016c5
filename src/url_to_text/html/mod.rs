pub mod entities;
pub mod extractors;
pub mod page_text;
pub mod sanitize;

use crate::model::normalize_language;
use scraper::{Html, Selector};
use std::sync::LazyLock;

static HTML_ROOT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("html[lang]").expect("Invalid html lang selector"));

/// Primary language subtag from `<html lang="...">`, lowercased.
pub fn document_language(document: &Html) -> Option<String> {
    document
        .select(&HTML_ROOT)
        .next()
        .and_then(|el| el.value().attr("lang"))
        .and_then(normalize_language)
}
