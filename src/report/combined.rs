//! Bundles every monthly report into one response.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde::Serialize;
use time::Month;
use tokio::task::{JoinError, spawn_blocking};

use crate::{
    AppState, Error,
    record::{Record, RecordFilter},
    report::{
        CategoryCount, MonthParams, PriceRangeCount, Statistics, compute_category_breakdown,
        compute_price_histogram, compute_statistics, month_from_query,
    },
    stores::{RecordQuery, RecordStore},
};

/// The records of one month together with all of its reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedView {
    /// Every record that sold in the month, in ID order.
    pub records: Vec<Record>,
    /// The summed price of the records that sold in the month.
    pub total_sales: f64,
    /// The number of records that sold in the month.
    pub total_sold_items: u64,
    /// The number of records that sold in any other month.
    pub total_not_sold_items: u64,
    /// The price histogram of the month.
    pub price_ranges: Vec<PriceRangeCount>,
    /// The number of records per category in the month.
    pub categories: Vec<CategoryCount>,
}

impl CombinedView {
    fn new(
        records: Vec<Record>,
        statistics: Statistics,
        price_ranges: Vec<PriceRangeCount>,
        categories: Vec<CategoryCount>,
    ) -> Self {
        Self {
            records,
            total_sales: statistics.total_sales,
            total_sold_items: statistics.total_sold_items,
            total_not_sold_items: statistics.total_not_sold_items,
            price_ranges,
            categories,
        }
    }
}

/// Assemble the combined view for `month`.
///
/// The record listing, statistics, histogram and category breakdown are read
/// concurrently on the blocking thread pool. If any of them fails the whole
/// view fails.
///
/// # Errors
/// Returns the first error from the store, or [Error::TaskFailed] if a read
/// task panicked.
pub async fn assemble_combined_view<S>(store: S, month: Month) -> Result<CombinedView, Error>
where
    S: RecordStore + Clone + Send + Sync + 'static,
{
    let records = spawn_read(store.clone(), move |store| {
        store.get_query(RecordQuery::all(RecordFilter::in_month(month)))
    });
    let statistics = spawn_read(store.clone(), move |store| compute_statistics(store, month));
    let price_ranges = spawn_read(store.clone(), move |store| {
        compute_price_histogram(store, month)
    });
    let categories = spawn_read(store, move |store| compute_category_breakdown(store, month));

    let (records, statistics, price_ranges, categories) =
        tokio::try_join!(records, statistics, price_ranges, categories)?;

    Ok(CombinedView::new(records, statistics, price_ranges, categories))
}

/// Run a blocking store read on the blocking thread pool.
async fn spawn_read<S, T, F>(store: S, read: F) -> Result<T, Error>
where
    S: RecordStore + Send + 'static,
    T: Send + 'static,
    F: FnOnce(&S) -> Result<T, Error> + Send + 'static,
{
    spawn_blocking(move || read(&store))
        .await
        .map_err(task_failed)?
}

fn task_failed(error: JoinError) -> Error {
    tracing::error!("a read task did not complete: {error}");
    Error::TaskFailed(error.to_string())
}

/// Get the combined view for the month in the query string.
pub(crate) async fn get_combined_view<S>(
    State(state): State<AppState<S>>,
    query: Result<Query<MonthParams>, QueryRejection>,
) -> Result<Json<CombinedView>, Error>
where
    S: RecordStore + Clone + Send + Sync + 'static,
{
    let month = month_from_query(query)?;

    let view = assemble_combined_view(state.record_store, month)
        .await
        .inspect_err(|error| tracing::error!("could not assemble combined view: {error}"))?;

    Ok(Json(view))
}
