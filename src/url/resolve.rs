use crate::url::normalize::normalize_parsed;
use url::Url;

/// Resolves an `href`/`src` value against the page it appeared on
///
/// Returns None if the link can't be used:
/// - empty values and fragment-only anchors
/// - javascript:, mailto:, tel:, data: schemes
/// - values that fail to resolve
/// - non-HTTP(S) URLs after resolution
///
/// # Examples
///
/// ```
/// use shelf_scrape::url::resolve_link;
/// use url::Url;
///
/// let base = Url::parse("https://books.example.com/catalogue/page-1.html").unwrap();
/// let next = resolve_link("page-2.html", &base).unwrap();
/// assert_eq!(next.as_str(), "https://books.example.com/catalogue/page-2.html");
/// ```
pub fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    let mut absolute = base_url.join(href).ok()?;
    normalize_parsed(&mut absolute).ok()?;
    Some(absolute)
}
