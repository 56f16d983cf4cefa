//! Product detail page parser
//!
//! Pulls the extended fields from a product page. Every field is optional on
//! the page; a missing one becomes an empty string.

use crate::crawler::parser::{attr_url, element_text, selector};
use crate::record::ProductDetails;
use crate::ShelfError;
use scraper::Html;
use url::Url;

/// Breadcrumb links needed before the last one is taken as the category
/// (Home / Books / Category)
const MIN_BREADCRUMB_LINKS: usize = 3;

/// Parses a product detail page
///
/// # Field Sources
///
/// | Field | Source |
/// |-------|--------|
/// | category | last `ul.breadcrumb li a`, when there are at least 3 |
/// | description | first `p` after `#product_description` |
/// | upc | `table.table` row whose header reads `UPC` |
/// | image_url | `.item.active img`, else the first `img` on the page |
///
/// # Arguments
///
/// * `html` - The detail page body
/// * `page_url` - URL the page was fetched from, used to resolve the image link
pub fn parse_detail_page(html: &str, page_url: &Url) -> Result<ProductDetails, ShelfError> {
    let document = Html::parse_document(html);

    let crumb_selector = selector("ul.breadcrumb li a", page_url)?;
    let description_selector = selector("#product_description ~ p", page_url)?;
    let row_selector = selector("table.table tr", page_url)?;
    let th_selector = selector("th", page_url)?;
    let td_selector = selector("td", page_url)?;
    let active_image_selector = selector(".item.active img", page_url)?;
    let any_image_selector = selector("img", page_url)?;

    let crumbs: Vec<_> = document.select(&crumb_selector).collect();
    let category = if crumbs.len() >= MIN_BREADCRUMB_LINKS {
        crumbs.last().map(|a| element_text(*a)).unwrap_or_default()
    } else {
        String::new()
    };

    let description = document
        .select(&description_selector)
        .next()
        .map(element_text)
        .unwrap_or_default();

    let upc = document
        .select(&row_selector)
        .find_map(|row| {
            let th = row.select(&th_selector).next()?;
            let td = row.select(&td_selector).next()?;
            element_text(th).eq_ignore_ascii_case("upc").then(|| element_text(td))
        })
        .unwrap_or_default();

    let image_url = document
        .select(&active_image_selector)
        .next()
        .or_else(|| document.select(&any_image_selector).next())
        .and_then(|img| attr_url(img, "src", page_url))
        .map(|url| url.to_string())
        .unwrap_or_default();

    let details = ProductDetails {
        category,
        description,
        upc,
        image_url,
    };

    if details.upc.is_empty() {
        tracing::debug!("No UPC found on {}", page_url);
    }

    Ok(details)
}
