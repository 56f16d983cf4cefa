//! Shared HTML helpers for the listing and detail parsers

use crate::url::resolve_link;
use crate::ShelfError;
use scraper::{ElementRef, Selector};
use url::Url;

/// Compiles a CSS selector, reporting failures against the page being parsed
pub(crate) fn selector(css: &'static str, page_url: &Url) -> Result<Selector, ShelfError> {
    Selector::parse(css).map_err(|e| ShelfError::HtmlParse {
        url: page_url.to_string(),
        message: format!("invalid selector '{}': {}", css, e),
    })
}

/// Returns an element's text with runs of whitespace collapsed to one space
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<Vec<_>>().join(" "))
}

pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Resolves an element attribute holding a link (`href`, `src`)
pub(crate) fn attr_url(element: ElementRef<'_>, attr: &str, page_url: &Url) -> Option<Url> {
    element
        .value()
        .attr(attr)
        .and_then(|value| resolve_link(value, page_url))
}
