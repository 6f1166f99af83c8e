//! Chart generation and rendering for the dashboard.
//!
//! This module creates ECharts visualizations for one month of sales:
//! - **Price Range Chart**: Bar chart of the number of items per price range
//! - **Category Chart**: Pie chart of the number of items per category
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with corresponding HTML containers and JavaScript initialization code.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{AxisType, Tooltip, Trigger},
    series::{Pie, bar},
};
use maud::{Markup, PreEscaped, html};

use crate::{
    html::HeadElement,
    query::{CategoryCounts, PriceRangeCount},
};

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the HTML containers for dashboard charts.
pub(super) fn charts_view(charts: &[DashboardChart]) -> Markup {
    html!(
        section id="charts" class="charts"
        {
            @for chart in charts {
                div id=(chart.id) class="chart" {}
            }
        }
    )
}

/// Generates JavaScript initialization code for dashboard charts.
///
/// Creates scripts that initialize ECharts instances with responsive resizing.
pub(super) fn charts_script(charts: &[DashboardChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);
                }})();"#,
                chart.id,
                escape_script_text(&chart.options)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        script_content
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

/// Escape `</` so text from the data cannot close the inline script early.
fn escape_script_text(text: &str) -> String {
    text.replace("</", "<\\/")
}

/// The number of items per price range as a bar chart.
pub(super) fn price_range_chart(month_name: &str, histogram: &[PriceRangeCount]) -> Chart {
    let labels: Vec<String> = histogram.iter().map(|bucket| bucket.range.clone()).collect();
    let counts: Vec<f64> = histogram.iter().map(|bucket| bucket.count as f64).collect();

    Chart::new()
        .title(
            Title::new()
                .text("Price Ranges")
                .subtext(format!("Items sold in {month_name}")),
        )
        .tooltip(Tooltip::new().trigger(Trigger::Axis))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(Axis::new().type_(AxisType::Value))
        .series(bar::Bar::new().name("Number of Items").data(counts))
}

/// The number of items per category as a pie chart.
pub(super) fn category_chart(month_name: &str, categories: &CategoryCounts) -> Chart {
    let data: Vec<(f64, &str)> = categories
        .iter()
        .map(|(category, count)| (*count as f64, category.as_str()))
        .collect();

    Chart::new()
        .title(
            Title::new()
                .text("Categories")
                .subtext(format!("Items sold in {month_name}")),
        )
        .tooltip(Tooltip::new().trigger(Trigger::Item))
        .legend(Legend::new().top("bottom"))
        .series(
            Pie::new()
                .name("Number of Items")
                .radius(vec!["40%", "70%"])
                .data(data),
        )
}
