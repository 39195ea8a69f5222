//! Sales Report is a small JSON service for reporting on sales-transaction records.
//!
//! The library provides the query-and-aggregation engine (month and search
//! predicates, paginated search, monthly statistics, a price histogram and a
//! category breakdown) together with the REST API that exposes it.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod app_state;
mod endpoints;
mod error;
mod logging;
mod pagination;
mod record;
mod report;
mod routing;

pub mod db;
pub mod seed;
pub mod stores;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use error::Error;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use pagination::{PageRequest, PaginationConfig};
pub use record::{
    MonthFilter, Record, RecordBuilder, RecordFilter, RecordId, SearchText, count_records,
    parse_month, require_month,
};
pub use report::{
    CategoryCount, CombinedView, PRICE_BANDS, PriceBand, PriceRangeCount, RecordPage, Statistics,
    assemble_combined_view, compute_category_breakdown, compute_price_histogram,
    compute_statistics, list_records,
};
pub use routing::build_router;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("could not listen for ctrl+c: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                tracing::error!("could not listen for the terminate signal: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::debug!("Received ctrl+c signal."),
        _ = terminate => tracing::debug!("Received terminate signal."),
    }

    tracing::info!("Shutting down, draining open connections.");
    handle.graceful_shutdown(Some(Duration::from_secs(1)));
}
