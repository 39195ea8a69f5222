//! Counts the records of a month per category.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde::Serialize;
use time::Month;

use crate::{
    AppState, Error,
    record::RecordFilter,
    report::{MonthParams, month_from_query},
    stores::RecordStore,
};

/// The number of records in one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    /// The category label, as stored on the records.
    pub category: String,
    /// The number of records with that category.
    pub count: u64,
}

/// Count the records that sold in `month` of any year for each category.
///
/// Only categories with at least one record in the month are returned.
///
/// # Errors
/// Returns an error if the store cannot be read.
pub fn compute_category_breakdown<S>(
    store: &S,
    month: Month,
) -> Result<Vec<CategoryCount>, Error>
where
    S: RecordStore,
{
    store.count_by_category(&RecordFilter::in_month(month))
}

/// Get the category breakdown for the month in the query string.
pub(crate) async fn get_category_breakdown<S>(
    State(state): State<AppState<S>>,
    query: Result<Query<MonthParams>, QueryRejection>,
) -> Result<Json<Vec<CategoryCount>>, Error>
where
    S: RecordStore + Clone + Send + Sync + 'static,
{
    let month = month_from_query(query)?;

    let categories = compute_category_breakdown(&state.record_store, month)
        .inspect_err(|error| tracing::error!("could not compute category breakdown: {error}"))?;

    Ok(Json(categories))
}
