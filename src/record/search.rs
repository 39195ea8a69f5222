//! Free text search over the title, description and price of a record.

use crate::record::Record;

/// A non-empty, case-folded search string.
///
/// Search text is matched literally: no character has a special meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchText(String);

impl SearchText {
    /// Create search text from a user query.
    ///
    /// Returns `None` for the empty query, which matches every record.
    pub fn new(query: &str) -> Option<Self> {
        if query.is_empty() {
            None
        } else {
            Some(Self(query.to_lowercase()))
        }
    }

    /// The case-folded query.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the query is a case-insensitive substring of the record's
    /// title, description or price.
    pub fn matches(&self, record: &Record) -> bool {
        self.matches_fields(&record.title, &record.description, record.price)
    }

    /// Same as [SearchText::matches] for fields that have not been assembled into a [Record].
    pub fn matches_fields(&self, title: &str, description: &str, price: f64) -> bool {
        contains_ignore_case(title, &self.0)
            || contains_ignore_case(description, &self.0)
            || contains_ignore_case(&price_text(price), &self.0)
    }
}

/// Render a price the way it is searched, e.g. `150` or `329.85`.
pub(crate) fn price_text(price: f64) -> String {
    price.to_string()
}

fn contains_ignore_case(haystack: &str, lowercase_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowercase_needle)
}
