//! Monthly sales totals.

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

/// Sales totals for one calendar month.
///
/// "Sold" and "not sold" describe whether a record sold in the month, not a
/// status of the record: every record counts towards exactly one of them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// The summed price of the records that sold in the month.
    pub total_sales: f64,
    /// The number of records that sold in the month.
    pub total_sold_items: u64,
    /// The number of records that sold in any other month.
    pub total_not_sold_items: u64,
}

/// Compute the sales totals for `month` across every year.
///
/// # Errors
/// Returns an error if the store cannot be read.
pub fn compute_statistics<S>(store: &S, month: Month) -> Result<Statistics, Error>
where
    S: RecordStore,
{
    let in_month = RecordFilter::in_month(month);

    Ok(Statistics {
        total_sales: store.total_price(&in_month)?,
        total_sold_items: store.count(&in_month)?,
        total_not_sold_items: store.count(&RecordFilter::not_in_month(month))?,
    })
}

/// Get the sales totals for the month in the query string.
pub(crate) async fn get_statistics<S>(
    State(state): State<AppState<S>>,
    query: Result<Query<MonthParams>, QueryRejection>,
) -> Result<Json<Statistics>, Error>
where
    S: RecordStore + Clone + Send + Sync + 'static,
{
    let month = month_from_query(query)?;

    let statistics = compute_statistics(&state.record_store, month)
        .inspect_err(|error| tracing::error!("could not compute statistics: {error}"))?;

    Ok(Json(statistics))
}
