//! The number of transactions per category in a month.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use time::Month;

use crate::{
    Error,
    transaction::{CategoryCount, TransactionStore, month_predicate, spawn_query},
};

use super::{MonthQuery, StatisticsState, month_from_query};

/// Count the transactions sold in `month` per category.
///
/// Only categories with at least one transaction in `month` are included.
pub async fn get_category_breakdown(
    store: &Arc<dyn TransactionStore>,
    month: Month,
) -> Result<Vec<CategoryCount>, Error> {
    spawn_query(store, move |store| {
        store.count_by_category(&month_predicate(month))
    })
    .await
}

/// Serve the category breakdown for the month in the query string.
pub async fn get_pie_chart_endpoint(
    State(state): State<StatisticsState>,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Result<Json<Vec<CategoryCount>>, Error> {
    let month = month_from_query(query)?;

    get_category_breakdown(&state.transaction_store, month)
        .await
        .map(Json)
}

#[cfg(test)]
mod tests {
    use time::{Month, macros::datetime};

    use crate::{
        test_utils::get_test_store,
        transaction::{CategoryCount, Predicate, Transaction, TransactionStore},
    };

    use super::get_category_breakdown;

    #[tokio::test]
    async fn counts_each_category_present() {
        let store = get_test_store();
        store
            .replace_all(&[
                Transaction::build("1", "Ring", 10.0, datetime!(2021-09-01 10:00 UTC), "jewelery")
                    .finalize(),
                Transaction::build("2", "Shirt", 20.0, datetime!(2022-09-02 10:00 UTC), "clothing")
                    .finalize(),
                Transaction::build("3", "Coat", 90.0, datetime!(2020-09-03 10:00 UTC), "clothing")
                    .finalize(),
                Transaction::build("4", "TV", 900.0, datetime!(2021-10-03 10:00 UTC), "electronics")
                    .finalize(),
            ])
            .unwrap();

        let got = get_category_breakdown(&store, Month::September).await.unwrap();

        assert_eq!(
            got,
            vec![
                CategoryCount { category: "clothing".to_owned(), items: 2 },
                CategoryCount { category: "jewelery".to_owned(), items: 1 },
            ]
        );
        let month_total = store
            .count(&Predicate::MonthEquals(Month::September))
            .unwrap();
        assert_eq!(got.iter().map(|count| count.items).sum::<u64>(), month_total);
    }

    #[tokio::test]
    async fn empty_month_has_no_categories() {
        let store = get_test_store();

        let got = get_category_breakdown(&store, Month::March).await.unwrap();

        assert!(got.is_empty());
    }

    #[test]
    fn serializes_category_as_id() {
        let got = serde_json::to_value(CategoryCount {
            category: "clothing".to_owned(),
            items: 2,
        })
        .unwrap();

        assert_eq!(got, serde_json::json!({ "_id": "clothing", "items": 2 }));
    }
}
