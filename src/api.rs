//! The JSON API route handlers.
//!
//! Each handler loads the whole record collection from the store, runs one
//! query over it and returns the result as JSON. Failures are returned as a
//! 500 response with a `{message, error}` body.

use std::{sync::Arc, time::Duration};

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use time::Month;

use crate::{
    AppState, Error,
    error::ApiError,
    month::parse_month,
    query::{
        CategoryCounts, CombinedReport, PriceRangeCount, Statistics, calculate_statistics,
        category_distribution, list_records, price_range_histogram,
    },
    record::Record,
    store::{RecordStore, load_and_compute, save_records},
};

/// The query parameters for searching and paging through records.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionsQuery {
    /// Text to look for in the title, description or price. Empty matches everything.
    #[serde(default)]
    pub search: String,
    /// The 1-based page number.
    pub page: Option<usize>,
    /// The number of records per page.
    pub per_page: Option<usize>,
}

/// The query parameters for the month-scoped views.
#[derive(Debug, Default, Deserialize)]
pub struct MonthQuery {
    /// A month name, abbreviation or number, e.g. "March".
    pub month: Option<String>,
}

impl MonthQuery {
    /// The month named in the query, or `None` if it is missing or not a month.
    ///
    /// An unknown month is not an error: it simply matches no records.
    pub fn selected_month(&self) -> Option<Month> {
        let selector = self.month.as_deref().unwrap_or_default();
        let month = parse_month(selector);

        if month.is_none() {
            tracing::warn!("\"{selector}\" is not a month, no records will match");
        }

        month
    }
}

/// Replace the stored records with a fresh copy of the seed data.
pub async fn initialize(
    State(state): State<AppState>,
) -> Result<(StatusCode, &'static str), ApiError> {
    const MESSAGE: &str = "Error initializing database";

    let records = state
        .seed_provider
        .fetch()
        .await
        .map_err(|error| ApiError::new(MESSAGE, error))?;

    save_records(&state.store, records)
        .await
        .map_err(|error| ApiError::new(MESSAGE, error))?;

    Ok((StatusCode::OK, "Database initialized with seed data"))
}

/// List one page of records matching the search text.
///
/// The month parameter is ignored here, the listing always covers the whole collection.
pub async fn get_transactions(
    State(state): State<AppState>,
    Query(query): Query<TransactionsQuery>,
) -> Result<Json<Vec<Record>>, ApiError> {
    let page = query.page.unwrap_or(state.pagination_config.default_page);
    let per_page = query
        .per_page
        .unwrap_or(state.pagination_config.default_page_size);
    let search = query.search;

    load_and_compute(&state.store, "transactions", move |records| {
        list_records(&records, &search, page, per_page)
    })
    .await
    .map(Json)
    .map_err(|error| ApiError::new("Error fetching transactions", error))
}

/// Get the sales totals for a month.
pub async fn get_statistics(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Statistics>, ApiError> {
    let month = query.selected_month();

    load_and_compute(&state.store, "statistics", move |records| {
        calculate_statistics(&records, month)
    })
    .await
    .map(Json)
    .map_err(|error| ApiError::new("Error fetching statistics", error))
}

/// Get the number of records per price range for a month.
pub async fn get_bar_chart(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Vec<PriceRangeCount>>, ApiError> {
    let month = query.selected_month();

    load_and_compute(&state.store, "bar chart", move |records| {
        price_range_histogram(&records, month)
    })
    .await
    .map(Json)
    .map_err(|error| ApiError::new("Error generating bar chart data", error))
}

/// Get the number of records per category for a month.
pub async fn get_pie_chart(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<CategoryCounts>, ApiError> {
    let month = query.selected_month();

    load_and_compute(&state.store, "pie chart", move |records| {
        category_distribution(&records, month)
    })
    .await
    .map(Json)
    .map_err(|error| ApiError::new("Error generating pie chart data", error))
}

/// Get the transactions, statistics, bar chart and pie chart for a month in one response.
pub async fn get_combined(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<CombinedReport>, ApiError> {
    build_combined_report(&state, query.selected_month())
        .await
        .map(Json)
        .map_err(|error| ApiError::new("Error fetching combined data", error))
}

/// Compute the four dashboard views for `month` concurrently.
///
/// The transactions are the first page of the unfiltered listing. Each view
/// runs as its own task that loads the collection and must finish within the
/// state's combined timeout. If any view fails the whole report fails.
pub async fn build_combined_report(
    state: &AppState,
    month: Option<Month>,
) -> Result<CombinedReport, Error> {
    let page = state.pagination_config.default_page;
    let page_size = state.pagination_config.default_page_size;
    let timeout = state.combined_timeout;

    let transactions = run_with_timeout(&state.store, timeout, "transactions", move |records| {
        list_records(&records, "", page, page_size)
    });
    let statistics = run_with_timeout(&state.store, timeout, "statistics", move |records| {
        calculate_statistics(&records, month)
    });
    let bar_chart = run_with_timeout(&state.store, timeout, "bar chart", move |records| {
        price_range_histogram(&records, month)
    });
    let pie_chart = run_with_timeout(&state.store, timeout, "pie chart", move |records| {
        category_distribution(&records, month)
    });

    let (transactions, statistics, bar_chart, pie_chart) =
        tokio::try_join!(transactions, statistics, bar_chart, pie_chart)?;

    Ok(CombinedReport {
        transactions,
        statistics,
        bar_chart,
        pie_chart,
    })
}

/// Run `compute` over the loaded collection, giving up after `timeout`.
async fn run_with_timeout<T, F>(
    store: &Arc<dyn RecordStore>,
    timeout: Duration,
    part: &'static str,
    compute: F,
) -> Result<T, Error>
where
    T: Send + 'static,
    F: FnOnce(Vec<Record>) -> T + Send + 'static,
{
    match tokio::time::timeout(timeout, load_and_compute(store, part, compute)).await {
        Ok(result) => result,
        Err(_) => {
            tracing::error!("the {part} took longer than {timeout:?}");
            Err(Error::Timeout(part))
        }
    }
}
