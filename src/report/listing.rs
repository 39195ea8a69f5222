//! Paginated search over all records.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde::Serialize;

use crate::{
    AppState, Error,
    pagination::PageRequest,
    record::{MonthFilter, Record, RecordFilter, SearchText, optional_month},
    stores::{RecordQuery, RecordStore},
};

/// One page of matching records and the number of matches across all pages.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPage {
    /// The records on this page, in ID order.
    pub records: Vec<Record>,
    /// The number of records that match the filter, regardless of the page.
    pub total: u64,
    /// The page number that was returned.
    pub page: u64,
    /// The page size that was applied.
    pub page_size: u64,
}

/// Fetch one page of the records that match `filter` along with the total match count.
///
/// # Errors
/// Returns an error if the store cannot be read.
pub fn list_records<S>(
    store: &S,
    filter: RecordFilter,
    page: PageRequest,
) -> Result<RecordPage, Error>
where
    S: RecordStore,
{
    let total = store.count(&filter)?;
    let records = store.get_query(RecordQuery {
        filter,
        limit: Some(page.page_size),
        offset: page.offset(),
    })?;

    Ok(RecordPage {
        records,
        total,
        page: page.page,
        page_size: page.page_size,
    })
}

/// The query parameters for [get_records].
///
/// Values are kept as text so that malformed numbers fall back to the
/// defaults instead of rejecting the request.
#[derive(Debug, Default, PartialEq)]
struct ListParams {
    page: Option<String>,
    page_size: Option<String>,
    search: Option<String>,
    month: Option<String>,
}

impl ListParams {
    /// Collect the known parameters from the query string pairs.
    ///
    /// The first value of a repeated parameter wins. `pageSize` and `perPage`
    /// name the same parameter. Unknown parameters are ignored.
    fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();

        for (key, value) in pairs {
            let slot = match key.as_str() {
                "page" => &mut params.page,
                "pageSize" | "perPage" => &mut params.page_size,
                "search" => &mut params.search,
                "month" => &mut params.month,
                _ => continue,
            };

            slot.get_or_insert(value);
        }

        params
    }
}

/// Search and page through the records.
pub(crate) async fn get_records<S>(
    State(state): State<AppState<S>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<RecordPage>, Error>
where
    S: RecordStore + Clone + Send + Sync + 'static,
{
    let Query(pairs) = query?;
    let params = ListParams::from_pairs(pairs);
    let month = optional_month(params.month.as_deref())?;
    let search = params.search.as_deref().and_then(SearchText::new);
    let filter = RecordFilter {
        month: month.map(MonthFilter::In),
        search,
    };
    let page = PageRequest::from_params(
        params.page.as_deref(),
        params.page_size.as_deref(),
        &state.pagination_config,
    );

    let page = list_records(&state.record_store, filter, page)
        .inspect_err(|error| tracing::error!("could not list records: {error}"))?;

    Ok(Json(page))
}
