//! URL handling module for Shelf-Scrape
//!
//! Start URLs are validated and normalized here, and every link found on a
//! listing or detail page is resolved against the page it came from.

mod normalize;
mod resolve;

pub use normalize::normalize_url;
pub use resolve::resolve_link;
