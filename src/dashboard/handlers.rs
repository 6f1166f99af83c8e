//! Dashboard HTTP handlers and view rendering.
//!
//! This module contains:
//! - The route handler for displaying the dashboard for one month
//! - HTML view functions for rendering the dashboard UI
//! - State and query types used by the handler

use std::sync::Arc;

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;
use time::Month;

use crate::{
    AppState, Error,
    dashboard::{
        charts::{DashboardChart, category_chart, charts_script, charts_view, price_range_chart},
        tables::{statistics_table, transactions_table},
    },
    endpoints,
    html::{HeadElement, PAGE_CONTAINER_STYLE, base},
    month::{all_months, month_name, parse_month},
    pagination::PaginationConfig,
    query::{calculate_statistics, category_distribution, list_records, price_range_histogram},
    store::{RecordStore, load_and_compute},
};

/// The month shown when the request does not name one.
const DEFAULT_MONTH: Month = Month::March;

/// The ECharts build used to draw the charts.
const ECHARTS_URL: &str = "https://cdn.jsdelivr.net/npm/echarts@5/dist/echarts.min.js";

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// Loads the record collection.
    pub store: Arc<dyn RecordStore>,
    /// Controls the size of the first page of the listing.
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// The query parameters for the dashboard page.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    /// A month name, abbreviation or number. Defaults to March.
    pub month: Option<String>,
}

impl DashboardQuery {
    /// The month to display, or `None` if the query names something that is
    /// not a month.
    fn selected_month(&self) -> Option<Month> {
        let Some(selector) = self.month.as_deref() else {
            return Some(DEFAULT_MONTH);
        };

        let month = parse_month(selector);

        if month.is_none() {
            tracing::warn!("\"{selector}\" is not a month, the dashboard will be empty");
        }

        month
    }
}

/// Display the sales overview for one month.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Response, Error> {
    let records = load_and_compute(&state.store, "dashboard", |records| records)
        .await
        .inspect_err(|error| tracing::error!("could not load records for the dashboard: {error}"))?;

    let month = query.selected_month();
    let title = month.map_or_else(|| "Unknown month".to_owned(), month_name);

    let charts = [
        DashboardChart {
            id: "price-range-chart",
            options: price_range_chart(&title, &price_range_histogram(&records, month)).to_string(),
        },
        DashboardChart {
            id: "category-chart",
            options: category_chart(&title, &category_distribution(&records, month)).to_string(),
        },
    ];

    let page_size = state.pagination_config.default_page_size;
    let first_page = list_records(&records, "", 1, page_size);

    let tables = [
        statistics_table(&title, &calculate_statistics(&records, month)),
        transactions_table(&first_page, page_size),
    ];

    Ok(dashboard_view(month, &charts, &tables).into_response())
}

fn month_selector(selected: Option<Month>) -> Markup {
    html! {
        form method="get" action=(endpoints::DASHBOARD_VIEW) class="month-selector" {
            label for="month-select" { "Month" }

            select id="month-select" name="month" {
                @for month in all_months() {
                    option value=(month_name(month)) selected[selected == Some(month)] {
                        (month_name(month))
                    }
                }
            }

            noscript {
                button type="submit" class="button" { "Show" }
            }
        }
    }
}

fn dashboard_view(month: Option<Month>, charts: &[DashboardChart], tables: &[Markup]) -> Markup {
    let content = html!(
        main class=(PAGE_CONTAINER_STYLE)
        {
            header class="dashboard-header"
            {
                h1 { "Transaction Dashboard" }
                (month_selector(month))
            }

            (charts_view(charts))

            section id="tables" class="tables"
            {
                @for table in tables {
                    (table)
                }
            }
        }
    );

    let scripts = [
        HeadElement::ScriptLink(ECHARTS_URL.to_owned()),
        HeadElement::ScriptLink("/static/dashboard.js".to_owned()),
        charts_script(charts),
    ];

    base("Dashboard", &scripts, &content)
}
