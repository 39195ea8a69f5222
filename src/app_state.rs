//! Implements a struct that holds the state of the REST server.

use crate::{pagination::PaginationConfig, stores::RecordStore};

/// The state of the REST server.
///
/// The record store is injected rather than opened here so that tests can
/// substitute an in-memory or failing store.
#[derive(Debug, Clone)]
pub struct AppState<S>
where
    S: RecordStore + Send + Sync,
{
    /// The store the reports are computed from.
    pub record_store: S,
    /// The config that controls how to page search results.
    pub pagination_config: PaginationConfig,
}

impl<S> AppState<S>
where
    S: RecordStore + Send + Sync,
{
    /// Create a new [AppState].
    pub fn new(record_store: S, pagination_config: PaginationConfig) -> Self {
        Self {
            record_store,
            pagination_config,
        }
    }
}
