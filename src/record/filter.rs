//! Combines the month and search predicates into one record filter.

use time::Month;

use crate::record::{Record, SearchText, month::sold_in_month};

/// Restricts records by the calendar month they sold in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthFilter {
    /// Records that sold in the month, in any year.
    In(Month),
    /// Records that sold in any other month.
    NotIn(Month),
}

impl MonthFilter {
    /// Whether `record` passes the filter.
    pub fn matches(self, record: &Record) -> bool {
        match self {
            MonthFilter::In(month) => sold_in_month(record, month),
            MonthFilter::NotIn(month) => !sold_in_month(record, month),
        }
    }
}

/// The predicate a record store applies before returning, counting or grouping records.
///
/// Each present condition must hold. The default filter matches every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    /// Restrict records by calendar month.
    pub month: Option<MonthFilter>,
    /// Restrict records to those containing the search text.
    pub search: Option<SearchText>,
}

impl RecordFilter {
    /// A filter for the records that sold in `month` of any year.
    pub fn in_month(month: Month) -> Self {
        Self {
            month: Some(MonthFilter::In(month)),
            search: None,
        }
    }

    /// A filter for the records that did not sell in `month` of any year.
    pub fn not_in_month(month: Month) -> Self {
        Self {
            month: Some(MonthFilter::NotIn(month)),
            search: None,
        }
    }

    /// Add a search condition to the filter.
    pub fn with_search(mut self, search: Option<SearchText>) -> Self {
        self.search = search;
        self
    }

    /// Whether `record` passes every condition of the filter.
    pub fn matches(&self, record: &Record) -> bool {
        self.month.is_none_or(|month| month.matches(record))
            && self
                .search
                .as_ref()
                .is_none_or(|search| search.matches(record))
    }
}
