use crate::UrlError;
use url::Url;

/// Parses and normalizes a page URL
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed
/// 2. Reject anything that isn't HTTP or HTTPS
/// 3. Require a host
/// 4. Lowercase the host
/// 5. Remove the fragment (everything after #)
///
/// The path and query are left untouched: catalog sites are free to treat
/// `page-1.html` and `page-1.html/` as different pages.
///
/// # Arguments
///
/// * `url_str` - The URL string to normalize
///
/// # Returns
///
/// * `Ok(Url)` - Normalized URL
/// * `Err(UrlError)` - Failed to parse or validate the URL
///
/// # Examples
///
/// ```
/// use shelf_scrape::url::normalize_url;
///
/// let url = normalize_url("https://BOOKS.example.com/catalogue/page-1.html#top").unwrap();
/// assert_eq!(url.as_str(), "https://books.example.com/catalogue/page-1.html");
/// ```
pub fn normalize_url(url_str: &str) -> Result<Url, UrlError> {
    let mut url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;
    normalize_parsed(&mut url)?;
    Ok(url)
}

/// Applies the normalization rules to an already-parsed URL in place
pub(crate) fn normalize_parsed(url: &mut Url) -> Result<(), UrlError> {
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    let host = url.host_str().ok_or(UrlError::MissingHost)?.to_lowercase();
    url.set_host(Some(&host))
        .map_err(|e| UrlError::Parse(format!("Failed to set host: {}", e)))?;

    url.set_fragment(None);

    Ok(())
}
