use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};
use std::sync::LazyLock;

/// Main-content text shorter than this falls back to the whole body.
const MIN_MAIN_CONTENT_CHARS: usize = 200;

/// Tags whose text never belongs to a recipe.
const SKIPPED_TAGS: &[&str] = &[
    "script", "style", "nav", "footer", "header", "aside", "iframe", "noscript", "svg",
    "template", "head",
];

const BLOCK_TAGS: &[&str] = &[
    "p", "div", "section", "article", "main", "li", "ul", "ol", "br", "h1", "h2", "h3", "h4",
    "h5", "h6", "tr", "table", "blockquote", "pre", "figure", "figcaption", "dd", "dt",
];

static HORIZONTAL_WS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t\x{A0}\f\v]+").expect("Invalid whitespace regex"));

static PADDED_NEWLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" ?\r?\n ?").expect("Invalid newline regex"));

static BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("Invalid blank line regex"));

static MAIN_CONTENT: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"article, main, [role="main"]"#).expect("Invalid main content selector")
});

static BODY: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("body").expect("Invalid body selector"));

/// Readable text of a page for the AI fallback, truncated to `max_chars`.
///
/// Boilerplate containers and comments are dropped. Text from `article`,
/// `main` or `[role=main]` is preferred when it is long enough to be real
/// content.
pub fn clean_page_text(document: &Html, max_chars: usize) -> String {
    let main_text = document
        .select(&MAIN_CONTENT)
        .map(|el| normalize_whitespace(&element_text(el)))
        .find(|text| text.chars().count() > MIN_MAIN_CONTENT_CHARS);

    let text = main_text.unwrap_or_else(|| {
        let root = document
            .select(&BODY)
            .next()
            .unwrap_or_else(|| document.root_element());
        normalize_whitespace(&element_text(root))
    });

    truncate_chars(&text, max_chars)
}

fn element_text(element: ElementRef) -> String {
    let mut out = String::new();
    collect_text(element, &mut out);
    out
}

fn collect_text(element: ElementRef, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => {
                let name = el.name();
                if SKIPPED_TAGS.contains(&name) {
                    continue;
                }
                let Some(child_el) = ElementRef::wrap(child) else {
                    continue;
                };
                let is_block = BLOCK_TAGS.contains(&name);
                if is_block {
                    out.push('\n');
                }
                collect_text(child_el, out);
                if is_block {
                    out.push('\n');
                }
            }
            _ => {}
        }
    }
}

fn normalize_whitespace(text: &str) -> String {
    let text = HORIZONTAL_WS.replace_all(text, " ");
    let text = PADDED_NEWLINE.replace_all(&text, "\n");
    let text = BLANK_LINES.replace_all(&text, "\n\n");
    text.trim().to_string()
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => text[..byte_index].to_string(),
        None => text.to_string(),
    }
}
