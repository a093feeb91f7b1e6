//! Defines the route handler for the paginated, searchable transaction list.

use std::sync::Arc;

use axum::{
    Json,
    extract::{FromRef, Query, State, rejection::QueryRejection},
};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    month::require_month,
    pagination::{PageRequest, PaginationConfig},
};

use super::{
    core::Transaction,
    predicate::Predicate,
    query::search_predicate,
    store::{TransactionStore, spawn_query},
};

/// The state needed for the transaction list.
#[derive(Clone)]
pub struct TransactionListState {
    /// The store to read transactions from.
    pub transaction_store: Arc<dyn TransactionStore>,
    /// The default and maximum page sizes.
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for TransactionListState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
            pagination_config: state.pagination_config,
        }
    }
}

/// The query parameters for the transaction list.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionListQuery {
    /// The full month name, e.g. "March".
    pub month: Option<String>,
    /// The 1-indexed page number.
    pub page: Option<u64>,
    /// The maximum number of transactions in the page.
    pub per_page: Option<u64>,
    /// Text to look for in the title or description, or a price.
    pub search: Option<String>,
}

/// One page of transactions and the number of transactions on all pages.
#[derive(Debug, PartialEq, Serialize)]
pub struct TransactionPage {
    /// The transactions on this page.
    pub transactions: Vec<Transaction>,
    /// The number of matching transactions across every page.
    pub total: u64,
}

/// List the transactions sold in a month, optionally filtered by a search term.
pub async fn list_transactions_endpoint(
    State(state): State<TransactionListState>,
    query: Result<Query<TransactionListQuery>, QueryRejection>,
) -> Result<Json<TransactionPage>, Error> {
    let Query(query) = query.map_err(|rejection| Error::InvalidQuery(rejection.body_text()))?;
    let month = require_month(query.month.as_deref())?;
    let page = PageRequest::new(query.page, query.per_page, &state.pagination_config)?;
    let filter = search_predicate(month, query.search.as_deref().unwrap_or_default());

    list_transactions(&state.transaction_store, filter, page)
        .await
        .map(Json)
}

/// Get one page of the transactions matching `filter` and the total count.
///
/// The page and the count are fetched concurrently.
pub(crate) async fn list_transactions(
    store: &Arc<dyn TransactionStore>,
    filter: Predicate,
    page: PageRequest,
) -> Result<TransactionPage, Error> {
    let filter = Arc::new(filter);
    let page_filter = Arc::clone(&filter);

    let (transactions, total) = tokio::try_join!(
        spawn_query(store, move |store| store.get_page(
            &page_filter,
            page.offset(),
            page.per_page
        )),
        spawn_query(store, move |store| store.count(&filter)),
    )?;

    Ok(TransactionPage {
        transactions,
        total,
    })
}
