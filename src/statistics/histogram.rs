//! A histogram of the prices of the transactions sold in a month.

use std::{ops::Bound, sync::Arc};

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde::Serialize;
use time::Month;
use tokio::task::JoinSet;

use crate::{
    Error,
    transaction::{NumericField, Predicate, TransactionStore, month_predicate},
};

use super::{MonthQuery, StatisticsState, month_from_query};

/// A labelled price interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PriceBucket {
    pub label: &'static str,
    pub lower: Bound<f64>,
    pub upper: Bound<f64>,
}

impl PriceBucket {
    const fn new(label: &'static str, lower: Bound<f64>, upper: Bound<f64>) -> Self {
        Self {
            label,
            lower,
            upper,
        }
    }

    fn predicate(&self, month: Month) -> Predicate {
        Predicate::And(vec![
            month_predicate(month),
            Predicate::NumericInRange(NumericField::Price, self.lower, self.upper),
        ])
    }
}

/// The histogram buckets in display order.
///
/// Apart from the first, each bucket excludes its lower bound so that
/// fractional prices such as 100.5 land in exactly one bucket. For whole
/// number prices this is the same as the labels, e.g. 101 to 200 inclusive.
pub(crate) const PRICE_BUCKETS: [PriceBucket; 10] = [
    PriceBucket::new("0-100", Bound::Included(0.0), Bound::Included(100.0)),
    PriceBucket::new("101-200", Bound::Excluded(100.0), Bound::Included(200.0)),
    PriceBucket::new("201-300", Bound::Excluded(200.0), Bound::Included(300.0)),
    PriceBucket::new("301-400", Bound::Excluded(300.0), Bound::Included(400.0)),
    PriceBucket::new("401-500", Bound::Excluded(400.0), Bound::Included(500.0)),
    PriceBucket::new("501-600", Bound::Excluded(500.0), Bound::Included(600.0)),
    PriceBucket::new("601-700", Bound::Excluded(600.0), Bound::Included(700.0)),
    PriceBucket::new("701-800", Bound::Excluded(700.0), Bound::Included(800.0)),
    PriceBucket::new("801-900", Bound::Excluded(800.0), Bound::Included(900.0)),
    PriceBucket::new("901-above", Bound::Excluded(900.0), Bound::Unbounded),
];

/// The number of transactions in a price bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketCount {
    /// The bucket label, e.g. "101-200".
    pub range: &'static str,
    /// The number of transactions with a price in the bucket.
    pub count: u64,
}

/// Count the transactions sold in `month` in each of the [PRICE_BUCKETS].
///
/// Every bucket is counted by its own query and the queries run
/// concurrently. The result always has one entry per bucket, in bucket order.
///
/// # Errors
/// Returns the first error from any of the bucket queries. The results of
/// the remaining queries are discarded.
pub async fn get_price_histogram(
    store: &Arc<dyn TransactionStore>,
    month: Month,
) -> Result<Vec<BucketCount>, Error> {
    let mut tasks = JoinSet::new();

    for (index, bucket) in PRICE_BUCKETS.iter().enumerate() {
        let store = Arc::clone(store);
        let filter = bucket.predicate(month);

        tasks.spawn_blocking(move || store.count(&filter).map(|count| (index, count)));
    }

    let mut counts = [0; PRICE_BUCKETS.len()];

    while let Some(result) = tasks.join_next().await {
        let (index, count) = result.map_err(|error| Error::TaskFailed(error.to_string()))??;
        counts[index] = count;
    }

    Ok(PRICE_BUCKETS
        .iter()
        .zip(counts)
        .map(|(bucket, count)| BucketCount {
            range: bucket.label,
            count,
        })
        .collect())
}

/// Serve the price histogram for the month in the query string.
pub async fn get_bar_chart_endpoint(
    State(state): State<StatisticsState>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Result<Json<Vec<BucketCount>>, Error> {
    let month = month_from_query(query)?;

    get_price_histogram(&state.transaction_store, month)
        .await
        .map(Json)
}
