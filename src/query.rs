//! The query engine: filters a record collection by search term or month and
//! computes the derived views shown on the dashboard.
//!
//! Every function here is pure. The caller loads the collection and passes it
//! in, so each request computes its result from scratch.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::Month;

use crate::{pagination::paginate, record::Record};

/// The label of a price range bucket with its inclusive upper bound.
///
/// Each bucket holds prices above the previous bucket's upper bound, so every
/// price falls into exactly one bucket.
struct PriceRange {
    label: &'static str,
    upper_bound: Option<f64>,
}

/// The price range buckets for the bar chart, in ascending order.
const PRICE_RANGES: [PriceRange; 10] = [
    PriceRange { label: "0-100", upper_bound: Some(100.0) },
    PriceRange { label: "101-200", upper_bound: Some(200.0) },
    PriceRange { label: "201-300", upper_bound: Some(300.0) },
    PriceRange { label: "301-400", upper_bound: Some(400.0) },
    PriceRange { label: "401-500", upper_bound: Some(500.0) },
    PriceRange { label: "501-600", upper_bound: Some(600.0) },
    PriceRange { label: "601-700", upper_bound: Some(700.0) },
    PriceRange { label: "701-800", upper_bound: Some(800.0) },
    PriceRange { label: "801-900", upper_bound: Some(900.0) },
    PriceRange { label: "901-above", upper_bound: None },
];

/// Sales totals for one month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// The sum of the prices of the sold records.
    pub total_sale_amount: f64,
    /// The number of sold records.
    pub sold_count: usize,
    /// The number of records that have not been sold.
    pub not_sold_count: usize,
}

/// The number of records in one price range bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRangeCount {
    /// The bucket label, e.g. "101-200".
    pub range: String,
    /// The number of records priced within the bucket.
    pub count: usize,
}

/// The number of records per category, ordered by category name.
pub type CategoryCounts = BTreeMap<String, usize>;

/// All four dashboard views for one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedReport {
    /// The first page of records, unfiltered.
    pub transactions: Vec<Record>,
    /// Sales totals for the month.
    pub statistics: Statistics,
    /// Record counts per price range for the month.
    pub bar_chart: Vec<PriceRangeCount>,
    /// Record counts per category for the month.
    pub pie_chart: CategoryCounts,
}

/// The records sold in `month` of any year, in collection order.
///
/// No record matches when `month` is `None`.
pub fn filter_by_month(records: &[Record], month: Option<Month>) -> Vec<&Record> {
    let Some(month) = month else {
        return Vec::new();
    };

    records
        .iter()
        .filter(|record| record.is_in_month(month))
        .collect()
}

/// Whether `record` contains `search` in its title or description, ignoring
/// case, or in the decimal form of its price.
///
/// `search` must already be lowercase.
fn matches_search(record: &Record, search: &str) -> bool {
    record.title.to_lowercase().contains(search)
        || record.description.to_lowercase().contains(search)
        || record.price.to_string().contains(search)
}

/// List one page of the records matching `search`.
///
/// An empty `search` matches every record. Any other term is matched as
/// given, whitespace included. The month is not applied here: the listing
/// covers the whole collection.
pub fn list_records(records: &[Record], search: &str, page: usize, page_size: usize) -> Vec<Record> {
    let search = search.to_lowercase();

    let matching = records
        .iter()
        .filter(|record| search.is_empty() || matches_search(record, &search))
        .cloned();

    paginate(matching, page, page_size)
}

/// Calculate the sales totals for the records sold in `month`.
pub fn calculate_statistics(records: &[Record], month: Option<Month>) -> Statistics {
    let in_month = filter_by_month(records, month);

    let (total_sale_amount, sold_count) = in_month
        .iter()
        .filter(|record| record.sold)
        .fold((0.0, 0), |(total, count), record| {
            (total + record.price, count + 1)
        });

    Statistics {
        total_sale_amount,
        sold_count,
        not_sold_count: in_month.len() - sold_count,
    }
}

/// Index into [PRICE_RANGES] of the bucket holding `price`.
fn price_range_index(price: f64) -> usize {
    PRICE_RANGES
        .iter()
        .position(|range| range.upper_bound.is_some_and(|upper_bound| price <= upper_bound))
        .unwrap_or(PRICE_RANGES.len() - 1)
}

/// Count the records sold in `month` per price range.
///
/// All ten buckets are returned in ascending order, including empty ones.
pub fn price_range_histogram(records: &[Record], month: Option<Month>) -> Vec<PriceRangeCount> {
    let mut counts = [0usize; PRICE_RANGES.len()];

    for record in filter_by_month(records, month) {
        counts[price_range_index(record.price)] += 1;
    }

    PRICE_RANGES
        .iter()
        .zip(counts)
        .map(|(range, count)| PriceRangeCount {
            range: range.label.to_owned(),
            count,
        })
        .collect()
}

/// Count the records sold in `month` per category.
///
/// Categories without any records in `month` are left out.
pub fn category_distribution(records: &[Record], month: Option<Month>) -> CategoryCounts {
    let mut counts = CategoryCounts::new();

    for record in filter_by_month(records, month) {
        *counts.entry(record.category.clone()).or_insert(0) += 1;
    }

    counts
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use time::Month;

    use crate::{
        month::all_months,
        query::{
            PriceRangeCount, Statistics, calculate_statistics, category_distribution,
            filter_by_month, list_records, price_range_histogram,
        },
        record::Record,
        test_utils::{sample_record, sample_records},
    };

    fn two_march_records() -> Vec<Record> {
        vec![
            sample_record(1, "Backpack", 50.0, "2024-03-05", "A", true),
            sample_record(2, "Jacket", 150.0, "2024-03-12", "B", false),
        ]
    }

    #[test]
    fn month_filter_ignores_year() {
        let records = vec![
            sample_record(1, "a", 1.0, "2021-03-01T10:00:00+05:30", "x", true),
            sample_record(2, "b", 1.0, "2022-03-31T10:00:00+05:30", "x", true),
            sample_record(3, "c", 1.0, "2022-04-01T10:00:00+05:30", "x", true),
        ];

        let got = filter_by_month(&records, Some(Month::March));

        assert_eq!(got, vec![&records[0], &records[1]]);
    }

    #[test]
    fn month_filter_without_month_matches_nothing() {
        assert!(filter_by_month(&two_march_records(), None).is_empty());
    }

    #[test]
    fn statistics_for_example_collection() {
        let got = calculate_statistics(&two_march_records(), Some(Month::March));

        assert_eq!(
            got,
            Statistics {
                total_sale_amount: 50.0,
                sold_count: 1,
                not_sold_count: 1,
            }
        );
    }

    #[test]
    fn histogram_for_example_collection() {
        let got = price_range_histogram(&two_march_records(), Some(Month::March));

        assert_eq!(got.len(), 10);
        assert_eq!(
            got[0],
            PriceRangeCount {
                range: "0-100".to_owned(),
                count: 1
            }
        );
        assert_eq!(
            got[1],
            PriceRangeCount {
                range: "101-200".to_owned(),
                count: 1
            }
        );
        assert!(got[2..].iter().all(|bucket| bucket.count == 0));
        assert_eq!(got[9].range, "901-above");
    }

    #[test]
    fn categories_for_example_collection() {
        let got = category_distribution(&two_march_records(), Some(Month::March));

        assert_eq!(
            got,
            BTreeMap::from([("A".to_owned(), 1), ("B".to_owned(), 1)])
        );
    }

    #[test]
    fn histogram_places_boundary_and_fractional_prices() {
        let records = vec![
            sample_record(1, "a", 100.0, "2024-05-01", "x", false),
            sample_record(2, "b", 100.5, "2024-05-01", "x", false),
            sample_record(3, "c", 101.0, "2024-05-01", "x", false),
            sample_record(4, "d", 900.0, "2024-05-01", "x", false),
            sample_record(5, "e", 900.01, "2024-05-01", "x", false),
            sample_record(6, "f", 25_000.0, "2024-05-01", "x", false),
            sample_record(7, "g", 0.0, "2024-05-01", "x", false),
            sample_record(8, "h", -5.0, "2024-05-01", "x", false),
            sample_record(9, "i", f64::NAN, "2024-05-01", "x", false),
        ];

        let counts: Vec<usize> = price_range_histogram(&records, Some(Month::May))
            .into_iter()
            .map(|bucket| bucket.count)
            .collect();

        // Negative prices count in the first bucket, NaN in the last.
        assert_eq!(counts, vec![3, 2, 0, 0, 0, 0, 0, 0, 1, 3]);
    }

    #[test]
    fn aggregates_partition_each_month() {
        let records = sample_records();

        for month in all_months() {
            let month_count = filter_by_month(&records, Some(month)).len();

            let statistics = calculate_statistics(&records, Some(month));
            assert_eq!(
                statistics.sold_count + statistics.not_sold_count,
                month_count,
                "statistics for {month}"
            );

            let histogram_total: usize = price_range_histogram(&records, Some(month))
                .iter()
                .map(|bucket| bucket.count)
                .sum();
            assert_eq!(histogram_total, month_count, "histogram for {month}");

            let category_total: usize = category_distribution(&records, Some(month))
                .values()
                .sum();
            assert_eq!(category_total, month_count, "categories for {month}");
        }
    }

    #[test]
    fn empty_month_gives_zeroed_aggregates() {
        let records = two_march_records();

        assert_eq!(
            calculate_statistics(&records, Some(Month::July)),
            Statistics::default()
        );
        assert!(
            price_range_histogram(&records, Some(Month::July))
                .iter()
                .all(|bucket| bucket.count == 0)
        );
        assert!(category_distribution(&records, Some(Month::July)).is_empty());
    }

    #[test]
    fn search_matches_price_text() {
        let got = list_records(&two_march_records(), "50", 1, 10);

        // "150" contains "50" as well.
        assert_eq!(got, two_march_records());

        let got = list_records(&two_march_records(), "150", 1, 10);
        assert_eq!(got, vec![two_march_records()[1].clone()]);
    }

    #[test]
    fn search_matches_title_and_description_ignoring_case() {
        let mut records = two_march_records();
        records[1].description = "Waterproof SHELL".to_owned();

        assert_eq!(
            list_records(&records, "BACKPACK", 1, 10),
            vec![records[0].clone()]
        );
        assert_eq!(
            list_records(&records, "shell", 1, 10),
            vec![records[1].clone()]
        );
        assert!(list_records(&records, "sofa", 1, 10).is_empty());
    }

    #[test]
    fn search_keeps_surrounding_whitespace() {
        let mut records = two_march_records();
        records[0].description = "nospace".to_owned();
        records[1].description = "nospace".to_owned();

        assert!(list_records(&records, " ", 1, 10).is_empty());
        assert!(list_records(&records, "backpack ", 1, 10).is_empty());

        records[1].description = "A warm jacket".to_owned();
        assert_eq!(
            list_records(&records, " ", 1, 10),
            vec![records[1].clone()]
        );
    }

    #[test]
    fn empty_search_lists_everything_regardless_of_month() {
        let records = sample_records();

        let got = list_records(&records, "", 1, records.len());

        assert_eq!(got, records);
    }

    #[test]
    fn list_pages_through_matches_in_order() {
        let records = sample_records();
        assert!(records.len() > 20);

        let second_page = list_records(&records, "", 2, 10);

        assert_eq!(second_page, records[10..20].to_vec());
        assert!(list_records(&records, "", 100, 10).is_empty());
    }

    #[test]
    fn list_is_idempotent() {
        let records = sample_records();

        let first = list_records(&records, "item", 2, 5);
        let second = list_records(&records, "item", 2, 5);

        assert_eq!(first, second);
    }
}
