//! Product records and the ordered record accumulator
//!
//! A [`ProductRecord`] is created from one entry of a listing page and may be
//! enriched once with [`ProductDetails`] before it is pushed into the
//! [`RecordSet`]. Records are never modified after that.

use std::collections::HashSet;

/// Column names for the fields every record carries
pub const BASE_COLUMNS: [&str; 5] = ["title", "price", "rating", "availability", "product_url"];

/// Column names for the fields collected from detail pages
pub const DETAIL_COLUMNS: [&str; 4] = ["category", "description", "upc", "image_url"];

/// Returns the output column names for a run
///
/// Detail columns are present whenever detail collection was requested, even
/// if no detail page could be fetched.
pub fn columns(include_details: bool) -> Vec<&'static str> {
    let mut columns = BASE_COLUMNS.to_vec();
    if include_details {
        columns.extend_from_slice(&DETAIL_COLUMNS);
    }
    columns
}

/// Fields taken from a product detail page
///
/// Any field the page doesn't provide is left as an empty string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductDetails {
    /// Category name from the breadcrumb trail
    pub category: String,

    /// Product description (possibly empty)
    pub description: String,

    /// Universal Product Code
    pub upc: String,

    /// Absolute URL of the cover image
    pub image_url: String,
}

/// One product scraped from a listing page
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub title: String,

    /// Price in the site's currency
    pub price: f64,

    /// Star rating, 1 to 5
    pub rating: u8,

    pub availability: String,

    /// Absolute URL of the product's detail page
    pub product_url: String,

    /// Present only when detail collection succeeded for this product
    pub details: Option<ProductDetails>,
}

/// A single output cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Decimal(f64),
    Integer(u8),
    Empty,
}

impl FieldValue<'_> {
    /// Renders the cell as text, the way it appears in a CSV file
    pub fn to_text(&self) -> String {
        match self {
            Self::Text(s) => (*s).to_string(),
            Self::Decimal(n) => format_decimal(*n),
            Self::Integer(n) => n.to_string(),
            Self::Empty => String::new(),
        }
    }
}

/// Two decimals when that is exact, otherwise the shortest text that reads
/// back as the same number
fn format_decimal(value: f64) -> String {
    let cents = (value * 100.0).round() / 100.0;
    if cents == value {
        format!("{:.2}", value)
    } else {
        value.to_string()
    }
}

impl ProductRecord {
    /// Returns the record's cells in column order
    ///
    /// With `include_details` set, records without details produce empty
    /// cells for the detail columns.
    pub fn fields(&self, include_details: bool) -> Vec<FieldValue<'_>> {
        let mut fields = vec![
            FieldValue::Text(&self.title),
            FieldValue::Decimal(self.price),
            FieldValue::Integer(self.rating),
            FieldValue::Text(&self.availability),
            FieldValue::Text(&self.product_url),
        ];

        if include_details {
            match &self.details {
                Some(details) => fields.extend([
                    text_or_empty(&details.category),
                    text_or_empty(&details.description),
                    text_or_empty(&details.upc),
                    text_or_empty(&details.image_url),
                ]),
                None => fields.extend([FieldValue::Empty; 4]),
            }
        }

        fields
    }
}

fn text_or_empty(value: &str) -> FieldValue<'_> {
    if value.is_empty() {
        FieldValue::Empty
    } else {
        FieldValue::Text(value)
    }
}

/// Ordered accumulator for scraped records
///
/// Keeps records in the order they were pushed and drops any record whose
/// `product_url` has already been seen.
#[derive(Debug, Default)]
pub struct RecordSet {
    records: Vec<ProductRecord>,
    seen_urls: HashSet<String>,
}

impl RecordSet {
    /// Creates an empty record set
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record
    ///
    /// Returns false (and drops the record) if a record with the same
    /// `product_url` is already present.
    pub fn push(&mut self, record: ProductRecord) -> bool {
        if !self.seen_urls.insert(record.product_url.clone()) {
            return false;
        }
        self.records.push(record);
        true
    }

    /// Returns true if a record with this product URL was already pushed
    pub fn contains(&self, product_url: &str) -> bool {
        self.seen_urls.contains(product_url)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ProductRecord] {
        &self.records
    }
}
