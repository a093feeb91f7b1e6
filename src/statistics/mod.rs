//! Aggregate views over the transactions sold in a month.
//!
//! Each view has a function that computes it from a [TransactionStore] and a
//! route handler that serves it as JSON:
//! - Summary totals of sales
//! - A histogram of prices
//! - The number of transactions per category
//! - All three of the above in one response

mod categories;
mod combined;
mod histogram;
mod summary;

use std::sync::Arc;

use axum::extract::{FromRef, Query, rejection::QueryRejection};
use serde::Deserialize;
use time::Month;

use crate::{AppState, Error, month::require_month, transaction::TransactionStore};

pub use categories::{get_category_breakdown, get_pie_chart_endpoint};
pub use combined::{CombinedData, get_combined_data, get_combined_data_endpoint};
pub use histogram::{BucketCount, get_bar_chart_endpoint, get_price_histogram};
pub use summary::{get_statistics, get_statistics_endpoint};

/// The state needed for the statistics endpoints.
#[derive(Clone)]
pub struct StatisticsState {
    /// The store to aggregate transactions from.
    pub transaction_store: Arc<dyn TransactionStore>,
}

impl FromRef<AppState> for StatisticsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
        }
    }
}

/// The query parameters shared by the statistics endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct MonthQuery {
    /// The full month name, e.g. "March".
    pub month: Option<String>,
}

/// Validate the query string and resolve the month it names.
fn month_from_query(query: Result<Query<MonthQuery>, QueryRejection>) -> Result<Month, Error> {
    let Query(query) = query.map_err(|rejection| Error::InvalidQuery(rejection.body_text()))?;

    require_month(query.month.as_deref())
}
