//! Parses month selectors and tests whether a record sold in a calendar month.

use time::Month;

use crate::{Error, record::Record};

const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// Parse a month selector into a calendar month.
///
/// Accepts full month names ("March"), three-letter abbreviations ("mar") and
/// the numbers 1 to 12 with an optional leading zero ("03"), ignoring case and
/// surrounding whitespace.
///
/// # Errors
/// Returns [Error::MissingMonth] if `selector` is blank, or
/// [Error::InvalidMonth] if it does not name a month.
pub fn parse_month(selector: &str) -> Result<Month, Error> {
    let trimmed = selector.trim();

    if trimmed.is_empty() {
        return Err(Error::MissingMonth);
    }

    if trimmed.bytes().all(|byte| byte.is_ascii_digit()) {
        return trimmed
            .parse::<u8>()
            .ok()
            .and_then(|number| Month::try_from(number).ok())
            .ok_or_else(|| Error::InvalidMonth(selector.to_owned()));
    }

    let lowercase = trimmed.to_lowercase();

    MONTHS
        .into_iter()
        .find(|month| {
            let name = month.to_string().to_lowercase();
            lowercase == name || (lowercase.len() == 3 && name.starts_with(&lowercase))
        })
        .ok_or_else(|| Error::InvalidMonth(selector.to_owned()))
}

/// Parse the month selector of a month-scoped operation.
///
/// # Errors
/// Returns [Error::MissingMonth] if `selector` is absent or blank, or
/// [Error::InvalidMonth] if it does not name a month.
pub fn require_month(selector: Option<&str>) -> Result<Month, Error> {
    selector.map_or(Err(Error::MissingMonth), parse_month)
}

/// Parse the month selector of an operation where the month is optional.
///
/// An absent or blank selector means "any month".
///
/// # Errors
/// Returns [Error::InvalidMonth] if `selector` is not blank and does not name a month.
pub(crate) fn optional_month(selector: Option<&str>) -> Result<Option<Month>, Error> {
    match selector.map(parse_month) {
        None | Some(Err(Error::MissingMonth)) => Ok(None),
        Some(result) => result.map(Some),
    }
}

/// Whether `record` sold in `month` of any year.
pub(crate) fn sold_in_month(record: &Record, month: Month) -> bool {
    record.date_of_sale.month() == month
}
