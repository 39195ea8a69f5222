//! Implements a record store that keeps every record in memory.
use std::{
    collections::BTreeMap,
    sync::{Arc, RwLock, RwLockReadGuard},
};

use crate::{
    Error,
    record::{Record, RecordFilter},
    report::CategoryCount,
    stores::{RecordQuery, RecordStore},
};

/// Holds records in process memory, applying filters with [RecordFilter::matches].
///
/// Useful for tests and demos that should not touch a database. Clones share
/// the same records.
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordStore {
    records: Arc<RwLock<Vec<Record>>>,
}

impl MemoryRecordStore {
    /// Create a store holding `records`.
    pub fn new(mut records: Vec<Record>) -> Self {
        records.sort_by_key(|record| record.id);

        Self {
            records: Arc::new(RwLock::new(records)),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Record>>, Error> {
        self.records
            .read()
            .inspect_err(|error| tracing::error!("could not acquire record store lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)
    }
}

impl RecordStore for MemoryRecordStore {
    fn get_query(&self, query: RecordQuery) -> Result<Vec<Record>, Error> {
        let records = self.read()?;
        let offset = usize::try_from(query.offset).unwrap_or(usize::MAX);
        let limit = query
            .limit
            .map_or(usize::MAX, |limit| usize::try_from(limit).unwrap_or(usize::MAX));

        Ok(records
            .iter()
            .filter(|record| query.filter.matches(record))
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    fn count(&self, filter: &RecordFilter) -> Result<u64, Error> {
        let records = self.read()?;
        let count = records.iter().filter(|record| filter.matches(record)).count();

        Ok(count as u64)
    }

    fn total_price(&self, filter: &RecordFilter) -> Result<f64, Error> {
        let records = self.read()?;

        Ok(records
            .iter()
            .filter(|record| filter.matches(record))
            .fold(0.0, |total, record| total + record.price))
    }

    fn count_by_category(&self, filter: &RecordFilter) -> Result<Vec<CategoryCount>, Error> {
        let records = self.read()?;
        let mut counts: BTreeMap<&str, u64> = BTreeMap::new();

        for record in records.iter().filter(|record| filter.matches(record)) {
            *counts.entry(record.category.as_str()).or_insert(0) += 1;
        }

        Ok(counts
            .into_iter()
            .map(|(category, count)| CategoryCount {
                category: category.to_owned(),
                count,
            })
            .collect())
    }
}
