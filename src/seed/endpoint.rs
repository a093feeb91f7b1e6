//! The route handler that reloads the database from the seed snapshot.

use std::sync::Arc;

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{
    AppState, Error,
    transaction::{Transaction, TransactionStore, spawn_query},
};

use super::SeedClient;

/// The state needed for the initialize endpoint.
#[derive(Clone)]
pub struct SeedState {
    /// The store that is replaced with the snapshot.
    pub transaction_store: Arc<dyn TransactionStore>,
    /// The client that downloads the snapshot.
    pub seed_client: SeedClient,
}

impl FromRef<AppState> for SeedState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            transaction_store: state.transaction_store.clone(),
            seed_client: state.seed_client.clone(),
        }
    }
}

/// Replace every transaction in `store` with `transactions`.
///
/// Either all of `transactions` are stored or, on error, the previous
/// transactions are left untouched.
///
/// # Errors
/// Returns an error if the store could not be updated.
pub async fn replace_transactions(
    store: &Arc<dyn TransactionStore>,
    transactions: Vec<Transaction>,
) -> Result<usize, Error> {
    spawn_query(store, move |store| store.replace_all(&transactions)).await
}

/// Fetch the seed snapshot and load it into the store.
///
/// # Errors
/// Returns an error if the snapshot could not be fetched or parsed, or if the
/// store could not be updated.
pub async fn load_seed_data(
    store: &Arc<dyn TransactionStore>,
    seed_client: &SeedClient,
) -> Result<usize, Error> {
    let transactions = seed_client.fetch().await?;
    replace_transactions(store, transactions).await
}

/// Reload all transactions from the seed snapshot.
///
/// Responds with the number of loaded transactions, or with a 502 if the
/// snapshot was unavailable and a 500 if the store could not be updated.
pub async fn initialize_endpoint(State(state): State<SeedState>) -> Response {
    match load_seed_data(&state.transaction_store, &state.seed_client).await {
        Ok(count) => {
            tracing::info!(
                "initialized database with {count} transactions from {}",
                state.seed_client.url()
            );

            (
                StatusCode::OK,
                Json(json!({
                    "message": "Database initialized with seed data",
                    "count": count,
                })),
            )
                .into_response()
        }
        Err(error) => {
            tracing::error!("could not initialize database: {error}");

            (
                error.status_code(),
                Json(json!({
                    "message": "Error initializing database",
                    "error": error.client_message(),
                })),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use axum::{extract::State, http::StatusCode, response::Response};
    use serde_json::{Value, json};

    use crate::{
        seed::SeedClient,
        test_utils::{FailingStore, StoreOperation, get_test_store, serve_json, serve_status},
        transaction::{TransactionStore, month_predicate},
    };

    use super::{SeedState, initialize_endpoint};

    const SNAPSHOT: &str = r#"[
        {"id": 1, "title": "Mug", "price": 50, "category": "kitchen", "sold": true,
         "dateOfSale": "2021-03-01T09:00:00Z"},
        {"id": 2, "title": "Lamp", "price": "150", "category": "home", "sold": "false",
         "dateOfSale": "2022-03-15T12:00:00Z"},
        {"id": 3, "productTitle": "Kettle", "price": 75.5, "category": "kitchen",
         "sold": true, "dateOfSale": "2021-04-01T09:00:00Z"}
    ]"#;

    fn seed_state(url: &str, store: Arc<dyn TransactionStore>) -> SeedState {
        SeedState {
            transaction_store: store,
            seed_client: SeedClient::new(url, Duration::from_secs(5)).unwrap(),
        }
    }

    async fn parse_response(response: Response) -> (StatusCode, Value) {
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn loads_snapshot_into_store() {
        let url = serve_json(SNAPSHOT).await;
        let store = get_test_store();
        let state = seed_state(&url, store.clone());

        let (status, body) = parse_response(initialize_endpoint(State(state)).await).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "message": "Database initialized with seed data", "count": 3 })
        );
        assert_eq!(
            store
                .count(&month_predicate(time::Month::March))
                .unwrap(),
            2
        );
    }

    #[tokio::test]
    async fn loading_twice_gives_same_store_contents() {
        let url = serve_json(SNAPSHOT).await;
        let store = get_test_store();
        let state = seed_state(&url, store.clone());

        initialize_endpoint(State(state.clone())).await;
        let first = store.get_page(&month_predicate(time::Month::March), 0, 100).unwrap();
        initialize_endpoint(State(state)).await;
        let second = store.get_page(&month_predicate(time::Month::March), 0, 100).unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn fetch_failure_is_bad_gateway_and_keeps_data() {
        let good_url = serve_json(SNAPSHOT).await;
        let store = get_test_store();
        initialize_endpoint(State(seed_state(&good_url, store.clone()))).await;

        let bad_url = serve_status(StatusCode::INTERNAL_SERVER_ERROR).await;
        let (status, body) =
            parse_response(initialize_endpoint(State(seed_state(&bad_url, store.clone()))).await)
                .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["message"], "Error initializing database");
        assert!(body["error"].as_str().unwrap().starts_with("could not fetch seed data"));
        assert_eq!(
            store
                .count(&month_predicate(time::Month::March))
                .unwrap(),
            2
        );
    }

    #[tokio::test]
    async fn invalid_record_is_bad_gateway() {
        let url = serve_json(r#"[{"id": 1, "title": "No price"}]"#).await;
        let state = seed_state(&url, get_test_store());

        let (status, body) = parse_response(initialize_endpoint(State(state)).await).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body["error"].as_str().unwrap().starts_with("invalid seed record"));
    }

    #[tokio::test]
    async fn store_failure_is_internal_error_with_generic_message() {
        let url = serve_json(SNAPSHOT).await;
        let state = seed_state(&url, Arc::new(FailingStore::new(StoreOperation::ReplaceAll)));

        let (status, body) = parse_response(initialize_endpoint(State(state)).await).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({
                "message": "Error initializing database",
                "error": "an unexpected error occurred",
            })
        );
    }
}
