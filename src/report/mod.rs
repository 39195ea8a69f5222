//! The reports computed over the record store and their route handlers.
//!
//! - `listing`: paginated search over all records
//! - `statistics`: monthly sales totals
//! - `histogram`: monthly counts per price band
//! - `categories`: monthly counts per category
//! - `combined`: all monthly reports in one response

mod categories;
mod combined;
mod histogram;
mod listing;
mod statistics;

use axum::extract::{Query, rejection::QueryRejection};
use serde::Deserialize;
use time::Month;

use crate::{Error, record::require_month};

pub use categories::{CategoryCount, compute_category_breakdown};
pub use combined::{CombinedView, assemble_combined_view};
pub use histogram::{PRICE_BANDS, PriceBand, PriceRangeCount, compute_price_histogram};
pub use listing::{RecordPage, list_records};
pub use statistics::{Statistics, compute_statistics};

pub(crate) use categories::get_category_breakdown;
pub(crate) use combined::get_combined_view;
pub(crate) use histogram::get_price_histogram;
pub(crate) use listing::get_records;
pub(crate) use statistics::get_statistics;

/// The query parameters of the month-scoped reports.
///
/// The month is optional here so that a missing month is reported as
/// [crate::Error::MissingMonth] rather than as a query rejection.
#[derive(Debug, Deserialize)]
pub(crate) struct MonthParams {
    pub(crate) month: Option<String>,
}

/// Read the required month from the query string of a month-scoped report.
///
/// # Errors
/// Returns [Error::InvalidQuery] if the query string cannot be read (for
/// example the month is given twice), otherwise the errors of [require_month].
pub(crate) fn month_from_query(
    query: Result<Query<MonthParams>, QueryRejection>,
) -> Result<Month, Error> {
    let Query(params) = query?;

    require_month(params.month.as_deref())
}
