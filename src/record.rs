//! Defines the sales record: one product transaction as stored in the data file
//! and returned by the API.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::{
    Date, Month, OffsetDateTime, PrimitiveDateTime, format_description::well_known::Rfc3339,
    macros::format_description,
};

/// The identifier of a [Record].
///
/// The seed data uses integers, but the ID is treated as opaque so text IDs
/// are accepted too.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    /// A numeric ID.
    Number(i64),
    /// A text ID.
    Text(String),
}

impl Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordId::Number(id) => write!(f, "{id}"),
            RecordId::Text(id) => write!(f, "{id}"),
        }
    }
}

/// The date and time a product was sold, kept exactly as it appears in the data file.
///
/// A missing date is empty, which matches no month.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SaleDate(String);

impl SaleDate {
    /// Create a sale date from its text form, e.g. "2021-11-27T20:29:54+05:30".
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The text form of the date.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The calendar date of the sale in the offset it was recorded in.
    ///
    /// Accepts RFC 3339 date-times, date-times without an offset, and plain
    /// dates. Returns `None` if the text is none of these.
    pub fn date(&self) -> Option<Date> {
        let text = self.0.trim();

        if let Ok(date_time) = OffsetDateTime::parse(text, &Rfc3339) {
            return Some(date_time.date());
        }

        let date_time_format = format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]"
        );
        if let Ok(date_time) = PrimitiveDateTime::parse(text, date_time_format) {
            return Some(date_time.date());
        }

        Date::parse(text, format_description!("[year]-[month]-[day]")).ok()
    }

    /// The month of the sale, ignoring the year.
    pub fn month(&self) -> Option<Month> {
        self.date().map(|date| date.month())
    }
}

/// A product transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Unique within the collection.
    pub id: RecordId,
    /// The product name.
    #[serde(default)]
    pub title: String,
    /// A longer description of the product.
    #[serde(default)]
    pub description: String,
    /// The sale price. Non-negative by convention, zero when missing.
    #[serde(default)]
    pub price: f64,
    /// A short category label, e.g. "electronics".
    #[serde(default)]
    pub category: String,
    /// When the product was sold. Only the month is used for filtering.
    #[serde(default)]
    pub date_of_sale: SaleDate,
    /// Whether the product has been sold. A missing flag means not sold.
    #[serde(default)]
    pub sold: bool,
    /// A URL to a picture of the product.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Record {
    /// Whether the record was sold in `month` of any year.
    pub fn is_in_month(&self, month: Month) -> bool {
        self.date_of_sale.month() == Some(month)
    }
}

/// Convert each JSON value into a [Record], skipping the ones that are not
/// records.
///
/// Each skipped value is logged with its position in `values`.
pub fn records_from_values(values: Vec<Value>) -> Vec<Record> {
    values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| {
            serde_json::from_value(value)
                .inspect_err(|error| tracing::warn!("skipping record {index}: {error}"))
                .ok()
        })
        .collect()
}
