//! Table views for dashboard data display.
//!
//! Provides the monthly statistics card and the searchable listing of records.

use maud::{Markup, html};

use crate::{
    html::{CARD_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_STYLE, format_currency},
    query::Statistics,
    record::Record,
};

/// Renders the sales totals for the selected month.
pub(super) fn statistics_table(month_name: &str, statistics: &Statistics) -> Markup {
    html! {
        div id="statistics" class=(CARD_STYLE) {
            h3 { "Statistics - " (month_name) }

            table class=(TABLE_STYLE) {
                tbody {
                    tr {
                        th scope="row" class=(TABLE_HEADER_STYLE) { "Total sale" }
                        td class=(TABLE_CELL_STYLE) data-field="total-sale-amount" {
                            (format_currency(statistics.total_sale_amount))
                        }
                    }
                    tr {
                        th scope="row" class=(TABLE_HEADER_STYLE) { "Total sold items" }
                        td class=(TABLE_CELL_STYLE) data-field="sold-count" {
                            (statistics.sold_count)
                        }
                    }
                    tr {
                        th scope="row" class=(TABLE_HEADER_STYLE) { "Total not sold items" }
                        td class=(TABLE_CELL_STYLE) data-field="not-sold-count" {
                            (statistics.not_sold_count)
                        }
                    }
                }
            }
        }
    }
}

/// Renders one record as a table row.
///
/// `static/dashboard.js` builds rows with the same columns when the listing is
/// searched or paged.
fn transaction_row(record: &Record) -> Markup {
    html! {
        tr data-id=(record.id) {
            td class=(TABLE_CELL_STYLE) { (record.id) }
            td class=(TABLE_CELL_STYLE) { (record.title) }
            td class=(TABLE_CELL_STYLE) { (record.description) }
            td class=(TABLE_CELL_STYLE) { (format_currency(record.price)) }
            td class=(TABLE_CELL_STYLE) { (record.category) }
            td class=(TABLE_CELL_STYLE) { @if record.sold { "Yes" } @else { "No" } }
            td class=(TABLE_CELL_STYLE) { (record.date_of_sale.as_str()) }
        }
    }
}

/// Renders the first page of the record listing with its search box and
/// paging controls.
pub(super) fn transactions_table(records: &[Record], page_size: usize) -> Markup {
    html! {
        div id="transactions" class=(CARD_STYLE) data-page="1" data-per-page=(page_size) {
            div class="transactions-toolbar" {
                h3 { "Transactions" }

                input
                    id="search-input"
                    type="search"
                    name="search"
                    placeholder="Search transactions"
                    autocomplete="off";
            }

            table class=(TABLE_STYLE) {
                thead {
                    tr {
                        @for heading in ["ID", "Title", "Description", "Price", "Category", "Sold", "Date"] {
                            th scope="col" class=(TABLE_HEADER_STYLE) { (heading) }
                        }
                    }
                }
                tbody id="transactions-list" {
                    @if records.is_empty() {
                        tr {
                            td class=(TABLE_CELL_STYLE) colspan="7" { "No transactions found." }
                        }
                    }
                    @for record in records {
                        (transaction_row(record))
                    }
                }
            }

            div class="pagination" {
                button id="previous-page" type="button" class="button" disabled { "Previous" }
                span id="page-number" { "Page 1" }
                button id="next-page" type="button" class="button"
                    disabled[records.len() < page_size] { "Next" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use crate::{
        dashboard::tables::{statistics_table, transactions_table},
        query::Statistics,
        test_utils::sample_record,
    };

    #[test]
    fn statistics_table_shows_totals() {
        let statistics = Statistics {
            total_sale_amount: 234.5,
            sold_count: 3,
            not_sold_count: 2,
        };

        let html = Html::parse_fragment(&statistics_table("March", &statistics).into_string());

        let cell = |field: &str| {
            let selector = Selector::parse(&format!("td[data-field='{field}']")).unwrap();
            html.select(&selector)
                .next()
                .unwrap_or_else(|| panic!("missing {field} cell"))
                .text()
                .collect::<String>()
        };
        assert_eq!(cell("total-sale-amount"), "$234.50");
        assert_eq!(cell("sold-count"), "3");
        assert_eq!(cell("not-sold-count"), "2");
    }

    #[test]
    fn transactions_table_has_one_row_per_record() {
        let records = vec![
            sample_record(1, "Backpack", 50.0, "2024-03-05", "bags", true),
            sample_record(2, "Jacket", 150.0, "2024-03-12", "clothing", false),
        ];

        let html = Html::parse_fragment(&transactions_table(&records, 10).into_string());

        let rows = Selector::parse("#transactions-list tr").unwrap();
        assert_eq!(html.select(&rows).count(), 2);

        let next = Selector::parse("#next-page[disabled]").unwrap();
        assert!(
            html.select(&next).next().is_some(),
            "next should be disabled on a partial page"
        );
    }

    #[test]
    fn empty_listing_shows_placeholder_row() {
        let html = Html::parse_fragment(&transactions_table(&[], 10).into_string());

        let rows = Selector::parse("#transactions-list tr").unwrap();
        let text: String = html
            .select(&rows)
            .flat_map(|row| row.text())
            .collect();
        assert_eq!(text, "No transactions found.");
    }
}
