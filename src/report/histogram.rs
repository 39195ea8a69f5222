//! Counts the records of a month in fixed price bands.

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
    stores::{RecordQuery, RecordStore},
};

/// A price range of the histogram, inclusive of its upper bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBand {
    /// The label shown for the band, e.g. "101-200".
    pub label: &'static str,
    /// The largest price in the band, or `None` for the open-ended last band.
    pub upper: Option<f64>,
}

/// The histogram bands in ascending order.
///
/// A price belongs to the first band whose upper bound is at least the price.
pub const PRICE_BANDS: [PriceBand; 10] = [
    PriceBand {
        label: "0-100",
        upper: Some(100.0),
    },
    PriceBand {
        label: "101-200",
        upper: Some(200.0),
    },
    PriceBand {
        label: "201-300",
        upper: Some(300.0),
    },
    PriceBand {
        label: "301-400",
        upper: Some(400.0),
    },
    PriceBand {
        label: "401-500",
        upper: Some(500.0),
    },
    PriceBand {
        label: "501-600",
        upper: Some(600.0),
    },
    PriceBand {
        label: "601-700",
        upper: Some(700.0),
    },
    PriceBand {
        label: "701-800",
        upper: Some(800.0),
    },
    PriceBand {
        label: "801-900",
        upper: Some(900.0),
    },
    PriceBand {
        label: "901-above",
        upper: None,
    },
];

/// The number of records in one price band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceRangeCount {
    /// The label of the band.
    pub range: String,
    /// The number of records priced within the band.
    pub count: u64,
}

/// The index into [PRICE_BANDS] of the band containing `price`.
pub(crate) fn band_index(price: f64) -> usize {
    PRICE_BANDS
        .iter()
        .position(|band| band.upper.is_none_or(|upper| price <= upper))
        .unwrap_or(PRICE_BANDS.len() - 1)
}

/// Count `prices` per band, returning every band in order, including empty ones.
pub(crate) fn bucket_prices(prices: impl IntoIterator<Item = f64>) -> Vec<PriceRangeCount> {
    let mut counts = [0u64; PRICE_BANDS.len()];

    for price in prices {
        counts[band_index(price)] += 1;
    }

    PRICE_BANDS
        .iter()
        .zip(counts)
        .map(|(band, count)| PriceRangeCount {
            range: band.label.to_owned(),
            count,
        })
        .collect()
}

/// Compute the price histogram of the records that sold in `month` of any year.
///
/// # Errors
/// Returns an error if the store cannot be read.
pub fn compute_price_histogram<S>(
    store: &S,
    month: Month,
) -> Result<Vec<PriceRangeCount>, Error>
where
    S: RecordStore,
{
    let records = store.get_query(RecordQuery::all(RecordFilter::in_month(month)))?;

    Ok(bucket_prices(records.iter().map(|record| record.price)))
}

/// Get the price histogram for the month in the query string.
pub(crate) async fn get_price_histogram<S>(
    State(state): State<AppState<S>>,
    query: Result<Query<MonthParams>, QueryRejection>,
) -> Result<Json<Vec<PriceRangeCount>>, Error>
where
    S: RecordStore + Clone + Send + Sync + 'static,
{
    let month = month_from_query(query)?;

    let histogram = compute_price_histogram(&state.record_store, month)
        .inspect_err(|error| tracing::error!("could not compute price histogram: {error}"))?;

    Ok(Json(histogram))
}

#[cfg(test)]
mod tests {
    use axum::{Router, routing::get};
    use axum_test::TestServer;
    use serde_json::Value;
    use time::Month;

    use crate::{
        AppState,
        pagination::PaginationConfig,
        report::histogram::{
            PRICE_BANDS, band_index, bucket_prices, compute_price_histogram, get_price_histogram,
        },
        stores::MemoryRecordStore,
        test_utils::march_and_april_store,
    };

    fn counts(histogram: &[super::PriceRangeCount]) -> Vec<u64> {
        histogram.iter().map(|band| band.count).collect()
    }

    #[test]
    fn band_edges_are_inclusive_upper_bounds() {
        assert_eq!(band_index(0.0), 0);
        assert_eq!(band_index(100.0), 0);
        assert_eq!(band_index(101.0), 1);
        assert_eq!(band_index(200.0), 1);
        assert_eq!(band_index(900.0), 8);
        assert_eq!(band_index(901.0), 9);
        assert_eq!(band_index(1_000_000.0), 9);
    }

    #[test]
    fn fractional_prices_between_bands_go_up() {
        assert_eq!(band_index(100.5), 1);
        assert_eq!(band_index(900.01), 9);
    }

    #[test]
    fn empty_input_returns_every_band() {
        let got = bucket_prices(Vec::<f64>::new());

        assert_eq!(got.len(), 10);
        assert!(got.iter().all(|band| band.count == 0));
        let labels: Vec<_> = got.iter().map(|band| band.range.as_str()).collect();
        let want: Vec<_> = PRICE_BANDS.iter().map(|band| band.label).collect();
        assert_eq!(labels, want);
    }

    #[test]
    fn march_histogram() {
        let store = march_and_april_store();

        let got = compute_price_histogram(&store, Month::March).unwrap();

        assert_eq!(counts(&got), vec![1, 1, 0, 0, 0, 0, 0, 0, 0, 1]);
    }

    #[tokio::test]
    async fn endpoint_returns_ten_bands() {
        let state = AppState::new(march_and_april_store(), PaginationConfig::default());
        let app = Router::new()
            .route("/api/bar-chart", get(get_price_histogram::<MemoryRecordStore>))
            .with_state(state);
        let server = TestServer::new(app);

        let response = server
            .get("/api/bar-chart")
            .add_query_param("month", "apr")
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        let bands = body.as_array().unwrap();
        assert_eq!(bands.len(), 10);
        assert_eq!(bands[0]["range"], "0-100");
        assert_eq!(bands[9]["range"], "901-above");
        let total: u64 = bands.iter().map(|band| band["count"].as_u64().unwrap()).sum();
        assert_eq!(total, 2);
    }

    #[tokio::test]
    async fn endpoint_requires_month() {
        let state = AppState::new(march_and_april_store(), PaginationConfig::default());
        let app = Router::new()
            .route("/api/bar-chart", get(get_price_histogram::<MemoryRecordStore>))
            .with_state(state);
        let server = TestServer::new(app);

        let response = server.get("/api/bar-chart").add_query_param("month", "").await;

        response.assert_status_bad_request();
    }
}
