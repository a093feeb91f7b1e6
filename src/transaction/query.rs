//! Builds the filters shared by the transaction list and the statistics.

use time::Month;

use super::predicate::{NumericField, Predicate, TextField};

/// Select transactions sold in `month` of any year.
pub(crate) fn month_predicate(month: Month) -> Predicate {
    Predicate::MonthEquals(month)
}

/// Select transactions sold in `month` that match `search`.
///
/// An empty `search` selects the whole month. Otherwise a transaction matches
/// if its title or description contains `search` as given, whitespace
/// included and ignoring case, or if `search` is a number equal to its price.
pub(crate) fn search_predicate(month: Month, search: &str) -> Predicate {
    if search.is_empty() {
        return month_predicate(month);
    }

    let mut any_of = vec![
        Predicate::TextContains(TextField::Title, search.to_owned()),
        Predicate::TextContains(TextField::Description, search.to_owned()),
    ];

    if let Some(price) = search.parse::<f64>().ok().filter(|price| price.is_finite()) {
        any_of.push(Predicate::NumericEquals(NumericField::Price, price));
    }

    Predicate::And(vec![month_predicate(month), Predicate::Or(any_of)])
}
