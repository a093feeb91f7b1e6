//! Resolves month names from query strings into calendar months.

use time::Month;

use crate::Error;

const MONTH_NAMES: [(&str, Month); 12] = [
    ("January", Month::January),
    ("February", Month::February),
    ("March", Month::March),
    ("April", Month::April),
    ("May", Month::May),
    ("June", Month::June),
    ("July", Month::July),
    ("August", Month::August),
    ("September", Month::September),
    ("October", Month::October),
    ("November", Month::November),
    ("December", Month::December),
];

/// Parse a full English month name, e.g. "March", into a [Month].
///
/// Matching is case-sensitive. The month index used by queries is
/// `u8::from(month)`, i.e. January is 1 and December is 12.
///
/// # Errors
/// Returns [Error::InvalidMonth] if `name` is not one of the twelve month
/// names.
pub fn parse_month(name: &str) -> Result<Month, Error> {
    MONTH_NAMES
        .iter()
        .find(|(month_name, _)| *month_name == name)
        .map(|(_, month)| *month)
        .ok_or_else(|| Error::InvalidMonth(name.to_owned()))
}

/// Parse the optional `month` query parameter shared by every read endpoint.
///
/// # Errors
/// Returns [Error::MissingMonth] if `name` is `None` or empty, otherwise the
/// errors of [parse_month].
pub(crate) fn require_month(name: Option<&str>) -> Result<Month, Error> {
    match name {
        None | Some("") => Err(Error::MissingMonth),
        Some(name) => parse_month(name),
    }
}
