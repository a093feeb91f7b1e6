//! Summary totals of the sales in a month.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use time::Month;

use crate::{
    Error,
    transaction::{SaleTotals, TransactionStore, month_predicate, spawn_query},
};

use super::{MonthQuery, StatisticsState, month_from_query};

/// Sum the prices and count the sold and unsold transactions in `month`.
///
/// A month without transactions yields all zeros.
pub async fn get_statistics(
    store: &Arc<dyn TransactionStore>,
    month: Month,
) -> Result<SaleTotals, Error> {
    spawn_query(store, move |store| store.totals(&month_predicate(month))).await
}

/// Serve the summary totals for the month in the query string.
pub async fn get_statistics_endpoint(
    State(state): State<StatisticsState>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Result<Json<SaleTotals>, Error> {
    let month = month_from_query(query)?;

    get_statistics(&state.transaction_store, month)
        .await
        .map(Json)
}

#[cfg(test)]
mod tests {
    use axum::extract::{Query, State};
    use time::Month;

    use crate::{
        Error,
        statistics::{MonthQuery, StatisticsState},
        test_utils::{get_test_store, march_scenario_store},
        transaction::SaleTotals,
    };

    use super::{get_statistics, get_statistics_endpoint};

    #[tokio::test]
    async fn march_scenario() {
        let store = march_scenario_store();

        let got = get_statistics(&store, Month::March).await.unwrap();

        assert_eq!(
            got,
            SaleTotals {
                total_sale_amount: 1199.0,
                total_sold_items: 2,
                total_not_sold_items: 1,
            }
        );
    }

    #[tokio::test]
    async fn empty_month_is_all_zeros() {
        let store = get_test_store();

        let got = get_statistics(&store, Month::March).await.unwrap();

        assert_eq!(got, SaleTotals::default());
    }

    #[tokio::test]
    async fn endpoint_requires_month() {
        let state = StatisticsState {
            transaction_store: get_test_store(),
        };

        let result = get_statistics_endpoint(State(state), Ok(Query(MonthQuery::default()))).await;

        assert!(matches!(result, Err(Error::MissingMonth)));
    }
}
