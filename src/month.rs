//! Maps month selectors from query strings to calendar months.

use time::Month;

/// Month names and abbreviations, in calendar order.
const MONTHS: [(&str, &str, Month); 12] = [
    ("january", "jan", Month::January),
    ("february", "feb", Month::February),
    ("march", "mar", Month::March),
    ("april", "apr", Month::April),
    ("may", "may", Month::May),
    ("june", "jun", Month::June),
    ("july", "jul", Month::July),
    ("august", "aug", Month::August),
    ("september", "sep", Month::September),
    ("october", "oct", Month::October),
    ("november", "nov", Month::November),
    ("december", "dec", Month::December),
];

/// Parse a month selector such as "March", "mar" or "3".
///
/// Names are matched case-insensitively and surrounding whitespace is ignored.
/// Returns `None` if `selector` does not name a month.
pub fn parse_month(selector: &str) -> Option<Month> {
    let selector = selector.trim().to_lowercase();

    if let Ok(index) = selector.parse::<u8>() {
        return Month::try_from(index).ok();
    }

    MONTHS
        .iter()
        .find(|(name, abbreviation, _)| selector == *name || selector == *abbreviation)
        .map(|(_, _, month)| *month)
}

/// The English name of `month`, e.g. "March".
pub fn month_name(month: Month) -> String {
    month.to_string()
}

/// All twelve months in calendar order.
pub fn all_months() -> impl Iterator<Item = Month> {
    MONTHS.iter().map(|(_, _, month)| *month)
}
