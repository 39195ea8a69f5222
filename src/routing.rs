//! Application router configuration.

use axum::{
    Router, middleware,
    response::{IntoResponse, Response},
    routing::get,
};

use crate::{
    AppState, Error, endpoints,
    logging::logging_middleware,
    report::{
        get_category_breakdown, get_combined_view, get_price_histogram, get_records,
        get_statistics,
    },
    stores::RecordStore,
};

/// Return a router with all the app's routes.
pub fn build_router<S>(state: AppState<S>) -> Router
where
    S: RecordStore + Clone + Send + Sync + 'static,
{
    Router::new()
        .route(endpoints::TRANSACTIONS, get(get_records::<S>))
        .route(endpoints::STATISTICS, get(get_statistics::<S>))
        .route(endpoints::BAR_CHART, get(get_price_histogram::<S>))
        .route(endpoints::PIE_CHART, get(get_category_breakdown::<S>))
        .route(endpoints::COMBINED, get(get_combined_view::<S>))
        .fallback(get_404_not_found)
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}

async fn get_404_not_found() -> Response {
    Error::NotFound.into_response()
}
