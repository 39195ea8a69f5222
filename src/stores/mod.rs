//! Contains the record store trait and its implementations.
//!
//! The reporting engine only ever reads from a store. Writes (seeding) go
//! through the SQLite specific functions in [crate::seed].

mod memory;
mod sqlite;

pub use memory::MemoryRecordStore;
pub use sqlite::SQLiteRecordStore;

use crate::{Error, record::Record, record::RecordFilter, report::CategoryCount};

/// Read access to the sales records owned by some storage engine.
///
/// Implementations return records in ascending ID order so that pages of a
/// query never skip or repeat a record while the data is unchanged.
pub trait RecordStore {
    /// Retrieve the records that match `query.filter`, in ID order, within the query window.
    fn get_query(&self, query: RecordQuery) -> Result<Vec<Record>, Error>;

    /// Count the records that match `filter`, ignoring any window.
    fn count(&self, filter: &RecordFilter) -> Result<u64, Error>;

    /// Sum the price of the records that match `filter`, or 0 if none match.
    fn total_price(&self, filter: &RecordFilter) -> Result<f64, Error>;

    /// Count the records that match `filter` per category, sorted by category.
    fn count_by_category(&self, filter: &RecordFilter) -> Result<Vec<CategoryCount>, Error>;
}

/// Defines how records should be fetched from [RecordStore::get_query].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordQuery {
    /// Include only records that match the filter.
    pub filter: RecordFilter,
    /// Selects up to the first N (`limit`) records after the offset. None selects all of them.
    pub limit: Option<u64>,
    /// Skip this many matching records.
    pub offset: u64,
}

impl RecordQuery {
    /// A query for every record that matches `filter`.
    pub fn all(filter: RecordFilter) -> Self {
        Self {
            filter,
            limit: None,
            offset: 0,
        }
    }
}
