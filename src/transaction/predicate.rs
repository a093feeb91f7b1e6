//! A small, store-neutral filter language for transactions.
//!
//! The [query builders](super::query) compose [Predicate]s and each store
//! lowers them to its own query language, e.g. [Predicate::to_sql] for SQLite.

use std::ops::Bound;

use rusqlite::types::Value;
use time::Month;

/// A text column that can be searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    /// The product name.
    Title,
    /// The product description.
    Description,
}

impl TextField {
    fn column(self) -> &'static str {
        match self {
            TextField::Title => "title",
            TextField::Description => "description",
        }
    }
}

/// A numeric column that can be compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericField {
    /// The sale price.
    Price,
}

impl NumericField {
    fn column(self) -> &'static str {
        match self {
            NumericField::Price => "price",
        }
    }
}

/// A condition on a transaction.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// The date of sale falls in `Month` of any year.
    MonthEquals(Month),
    /// All of the predicates hold. An empty list always holds.
    And(Vec<Predicate>),
    /// Any of the predicates holds. An empty list never holds.
    Or(Vec<Predicate>),
    /// The field contains the text, ignoring ASCII case.
    ///
    /// Only ASCII letters are folded, so "É" does not match "é".
    TextContains(TextField, String),
    /// The field equals the number.
    NumericEquals(NumericField, f64),
    /// The field lies between the two bounds.
    NumericInRange(NumericField, Bound<f64>, Bound<f64>),
}

/// A SQL `WHERE` clause with its positional parameters.
#[derive(Debug, PartialEq)]
pub(crate) struct SqlFilter {
    pub clause: String,
    pub params: Vec<Value>,
}

impl Predicate {
    /// Lower the predicate to a SQLite expression over the transaction table.
    ///
    /// Parameters are numbered from `?1`, so callers that need more
    /// parameters should number theirs from `params.len() + 1`.
    pub(crate) fn to_sql(&self) -> SqlFilter {
        let mut params = Vec::new();
        let clause = self.write_sql(&mut params);

        SqlFilter { clause, params }
    }

    fn write_sql(&self, params: &mut Vec<Value>) -> String {
        match self {
            Predicate::MonthEquals(month) => {
                params.push(Value::Integer(u8::from(*month).into()));
                format!("sale_month = ?{}", params.len())
            }
            Predicate::And(predicates) => join_sql(predicates, " AND ", "1", params),
            Predicate::Or(predicates) => join_sql(predicates, " OR ", "0", params),
            Predicate::TextContains(field, needle) => {
                params.push(Value::Text(format!("%{}%", escape_like(needle))));
                format!("{} LIKE ?{} ESCAPE '\\'", field.column(), params.len())
            }
            Predicate::NumericEquals(field, value) => {
                params.push(Value::Real(*value));
                format!("{} = ?{}", field.column(), params.len())
            }
            Predicate::NumericInRange(field, lower, upper) => {
                let mut parts = Vec::new();

                match lower {
                    Bound::Included(value) => {
                        params.push(Value::Real(*value));
                        parts.push(format!("{} >= ?{}", field.column(), params.len()));
                    }
                    Bound::Excluded(value) => {
                        params.push(Value::Real(*value));
                        parts.push(format!("{} > ?{}", field.column(), params.len()));
                    }
                    Bound::Unbounded => {}
                }

                match upper {
                    Bound::Included(value) => {
                        params.push(Value::Real(*value));
                        parts.push(format!("{} <= ?{}", field.column(), params.len()));
                    }
                    Bound::Excluded(value) => {
                        params.push(Value::Real(*value));
                        parts.push(format!("{} < ?{}", field.column(), params.len()));
                    }
                    Bound::Unbounded => {}
                }

                if parts.is_empty() {
                    "1".to_owned()
                } else {
                    format!("({})", parts.join(" AND "))
                }
            }
        }
    }
}

fn join_sql(
    predicates: &[Predicate],
    separator: &str,
    identity: &str,
    params: &mut Vec<Value>,
) -> String {
    if predicates.is_empty() {
        return identity.to_owned();
    }

    let parts: Vec<String> = predicates
        .iter()
        .map(|predicate| predicate.write_sql(params))
        .collect();

    format!("({})", parts.join(separator))
}

/// Escape the `LIKE` wildcards in `text` so it matches literally.
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }

    escaped
}

#[cfg(test)]
impl Predicate {
    /// Evaluate the predicate in memory, mirroring the SQL semantics.
    pub(crate) fn matches(&self, transaction: &super::Transaction) -> bool {
        use std::ops::RangeBounds;

        match self {
            Predicate::MonthEquals(month) => transaction.sale_month() == u8::from(*month),
            Predicate::And(predicates) => predicates.iter().all(|p| p.matches(transaction)),
            Predicate::Or(predicates) => predicates.iter().any(|p| p.matches(transaction)),
            Predicate::TextContains(field, needle) => {
                let haystack = match field {
                    TextField::Title => Some(transaction.title.as_str()),
                    TextField::Description => transaction.description.as_deref(),
                };

                haystack.is_some_and(|haystack| {
                    haystack
                        .to_ascii_lowercase()
                        .contains(&needle.to_ascii_lowercase())
                })
            }
            Predicate::NumericEquals(NumericField::Price, value) => transaction.price == *value,
            Predicate::NumericInRange(NumericField::Price, lower, upper) => {
                (*lower, *upper).contains(&transaction.price)
            }
        }
    }
}
