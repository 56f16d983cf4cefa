//! Listing page parser
//!
//! A listing page holds a grid of `article.product_pod` cards and, unless it
//! is the last page, an `li.next a` pagination link. Each card yields one
//! base [`ProductRecord`]; cards missing a required field are skipped.

use crate::crawler::parser::{attr_url, element_text, selector};
use crate::record::ProductRecord;
use crate::ShelfError;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use url::Url;

static PRICE_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"([0-9]+(?:\.[0-9]+)?)").ok());

/// Result of parsing one listing page
#[derive(Debug, Clone, Default)]
pub struct ListingPage {
    /// Well-formed product entries, in page order
    pub records: Vec<ProductRecord>,

    /// Absolute URL of the next listing page, if any
    pub next_page: Option<Url>,

    /// Number of product cards that were skipped as malformed
    pub skipped: usize,
}

struct CardSelectors {
    link: Selector,
    price: Selector,
    rating: Selector,
    availability: Selector,
}

/// Parses a listing page
///
/// # Arguments
///
/// * `html` - The listing page body
/// * `page_url` - URL the page was fetched from, used to resolve relative links
///
/// # Returns
///
/// * `Ok(ListingPage)` - Records in page order plus the next-page link
/// * `Err(ShelfError)` - A selector could not be compiled
///
/// # Example
///
/// ```
/// use shelf_scrape::crawler::parse_listing_page;
/// use url::Url;
///
/// let html = r#"<article class="product_pod">
///   <p class="star-rating Two"></p>
///   <h3><a href="book_1/index.html" title="Full Title">Full...</a></h3>
///   <p class="price_color">£12.50</p>
///   <p class="instock availability">In stock</p>
/// </article>"#;
/// let page_url = Url::parse("https://books.example.com/catalogue/page-1.html").unwrap();
/// let page = parse_listing_page(html, &page_url).unwrap();
/// assert_eq!(page.records[0].title, "Full Title");
/// assert_eq!(page.records[0].rating, 2);
/// assert!(page.next_page.is_none());
/// ```
pub fn parse_listing_page(html: &str, page_url: &Url) -> Result<ListingPage, ShelfError> {
    let document = Html::parse_document(html);

    let card_selector = selector("article.product_pod", page_url)?;
    let next_selector = selector("li.next a[href]", page_url)?;
    let selectors = CardSelectors {
        link: selector("h3 a", page_url)?,
        price: selector("p.price_color", page_url)?,
        rating: selector("p.star-rating", page_url)?,
        availability: selector("p.availability", page_url)?,
    };

    let mut page = ListingPage::default();

    // Product cards
    for (index, card) in document.select(&card_selector).enumerate() {
        match extract_card(card, &selectors, page_url) {
            Ok(record) => page.records.push(record),
            Err(reason) => {
                tracing::warn!(
                    "Skipping product {} on {}: {}",
                    index + 1,
                    page_url,
                    reason
                );
                page.skipped += 1;
            }
        }
    }

    // Pagination
    page.next_page = document
        .select(&next_selector)
        .next()
        .and_then(|link| attr_url(link, "href", page_url));

    tracing::debug!(
        "Parsed {} products ({} skipped) from {}, next page: {:?}",
        page.records.len(),
        page.skipped,
        page_url,
        page.next_page.as_ref().map(Url::as_str)
    );

    Ok(page)
}

/// Extracts a base record from one product card
///
/// Returns a short reason when a required field is missing or unreadable.
fn extract_card(
    card: ElementRef<'_>,
    selectors: &CardSelectors,
    page_url: &Url,
) -> Result<ProductRecord, String> {
    let link = card
        .select(&selectors.link)
        .next()
        .ok_or("no title link")?;

    let title = link
        .value()
        .attr("title")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| element_text(link));
    if title.is_empty() {
        return Err("empty title".to_string());
    }

    let product_url = attr_url(link, "href", page_url).ok_or("missing or invalid product link")?;

    let price_text = card
        .select(&selectors.price)
        .next()
        .map(element_text)
        .ok_or("no price")?;
    let price =
        parse_price(&price_text).ok_or_else(|| format!("unreadable price '{}'", price_text))?;

    let rating = card
        .select(&selectors.rating)
        .next()
        .and_then(parse_rating)
        .ok_or("no star rating")?;

    let availability = card
        .select(&selectors.availability)
        .next()
        .map(element_text)
        .filter(|a| !a.is_empty())
        .ok_or("no availability")?;

    Ok(ProductRecord {
        title,
        price,
        rating,
        availability,
        product_url: product_url.to_string(),
        details: None,
    })
}

/// Parses a price such as `£51.77` or `51,77 €`
///
/// Takes the first number in the text; a comma is read as the decimal point.
pub fn parse_price(text: &str) -> Option<f64> {
    let pattern = PRICE_PATTERN.as_ref()?;
    let normalized = text.replace(',', ".");
    pattern
        .captures(&normalized)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Reads the star rating from an element's `star-rating <Word>` classes
pub fn parse_rating(element: ElementRef<'_>) -> Option<u8> {
    element.value().classes().find_map(rating_from_word)
}

fn rating_from_word(word: &str) -> Option<u8> {
    match word {
        "One" => Some(1),
        "Two" => Some(2),
        "Three" => Some(3),
        "Four" => Some(4),
        "Five" => Some(5),
        _ => None,
    }
}
