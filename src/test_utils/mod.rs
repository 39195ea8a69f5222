//! Fixtures shared by the unit tests.

#![allow(missing_docs)]

use time::{OffsetDateTime, macros::datetime};

use crate::{
    Error,
    record::{Record, RecordFilter},
    report::CategoryCount,
    stores::{MemoryRecordStore, RecordQuery, RecordStore},
};

/// A store with `count` records titled "Item 1" through "Item {count}", all sold in January 2022.
pub(crate) fn numbered_store(count: i64) -> MemoryRecordStore {
    let records = (1..=count)
        .map(|id| {
            Record::build(id, id as f64, datetime!(2022-01-15 12:00 UTC))
                .title(&format!("Item {id}"))
                .category("misc")
                .finish()
        })
        .collect();

    MemoryRecordStore::new(records)
}

/// Three records sold in March (over two years) and two sold in April.
///
/// | id | price | category    | month |
/// |----|-------|-------------|-------|
/// | 1  | 50    | clothing    | March |
/// | 2  | 150   | clothing    | March |
/// | 3  | 950   | electronics | March |
/// | 4  | 20    | clothing    | April |
/// | 5  | 329.5 | home        | April |
pub(crate) fn march_and_april_store() -> MemoryRecordStore {
    MemoryRecordStore::new(vec![
        record(1, 50.0, datetime!(2021-03-10 09:30 UTC), "Blue Shirt", "clothing"),
        record(2, 150.0, datetime!(2022-03-28 18:45 +05:30), "Denim Jacket", "clothing"),
        record(3, 950.0, datetime!(2021-03-02 14:00 UTC), "Laptop", "electronics"),
        record(4, 20.0, datetime!(2021-04-01 08:00 UTC), "Socks", "clothing"),
        record(5, 329.5, datetime!(2022-04-19 21:15 -04:00), "Kettle", "home"),
    ])
}

fn record(
    id: i64,
    price: f64,
    date_of_sale: OffsetDateTime,
    title: &str,
    category: &str,
) -> Record {
    Record::build(id, price, date_of_sale)
        .title(title)
        .description(&format!("A {} for sale", title.to_lowercase()))
        .category(category)
        .finish()
}

/// A store whose every read fails as if the database lock were poisoned.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FailingRecordStore;

impl RecordStore for FailingRecordStore {
    fn get_query(&self, _query: RecordQuery) -> Result<Vec<Record>, Error> {
        Err(Error::DatabaseLockError)
    }

    fn count(&self, _filter: &RecordFilter) -> Result<u64, Error> {
        Err(Error::DatabaseLockError)
    }

    fn total_price(&self, _filter: &RecordFilter) -> Result<f64, Error> {
        Err(Error::DatabaseLockError)
    }

    fn count_by_category(&self, _filter: &RecordFilter) -> Result<Vec<CategoryCount>, Error> {
        Err(Error::DatabaseLockError)
    }
}

/// Wraps a working store and fails only the category counts.
#[derive(Debug, Clone)]
pub(crate) struct FlakyRecordStore {
    inner: MemoryRecordStore,
}

impl FlakyRecordStore {
    pub(crate) fn failing_category_counts(inner: MemoryRecordStore) -> Self {
        Self { inner }
    }
}

impl RecordStore for FlakyRecordStore {
    fn get_query(&self, query: RecordQuery) -> Result<Vec<Record>, Error> {
        self.inner.get_query(query)
    }

    fn count(&self, filter: &RecordFilter) -> Result<u64, Error> {
        self.inner.count(filter)
    }

    fn total_price(&self, filter: &RecordFilter) -> Result<f64, Error> {
        self.inner.total_price(filter)
    }

    fn count_by_category(&self, _filter: &RecordFilter) -> Result<Vec<CategoryCount>, Error> {
        Err(Error::DatabaseLockError)
    }
}
