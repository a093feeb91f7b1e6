//! Serves the summary, histogram and category breakdown in one response.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde::Serialize;
use time::Month;

use crate::{
    Error,
    transaction::{CategoryCount, SaleTotals, TransactionStore},
};

use super::{
    MonthQuery, StatisticsState,
    categories::get_category_breakdown,
    histogram::{BucketCount, get_price_histogram},
    month_from_query,
    summary::get_statistics,
};

/// The three aggregate views for one month.
#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedData {
    /// See [get_statistics].
    pub statistics: SaleTotals,
    /// See [get_price_histogram].
    pub bar_chart_data: Vec<BucketCount>,
    /// See [get_category_breakdown].
    pub pie_chart_data: Vec<CategoryCount>,
}

/// Compute the statistics, price histogram and category breakdown for `month`
/// concurrently.
///
/// # Errors
/// Fails as a whole with the first error from any of the three views. No
/// partial result is returned.
pub async fn get_combined_data(
    store: &Arc<dyn TransactionStore>,
    month: Month,
) -> Result<CombinedData, Error> {
    let (statistics, bar_chart_data, pie_chart_data) = tokio::try_join!(
        get_statistics(store, month),
        get_price_histogram(store, month),
        get_category_breakdown(store, month),
    )?;

    Ok(CombinedData {
        statistics,
        bar_chart_data,
        pie_chart_data,
    })
}

/// Serve the combined views for the month in the query string.
pub async fn get_combined_data_endpoint(
    State(state): State<StatisticsState>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Result<Json<CombinedData>, Error> {
    let month = month_from_query(query)?;

    get_combined_data(&state.transaction_store, month)
        .await
        .map(Json)
}
