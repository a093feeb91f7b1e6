//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{
    Error,
    db::initialize,
    pagination::PaginationConfig,
    seed::SeedClient,
    transaction::{SQLiteTransactionStore, TransactionStore},
};

/// The state of the REST server.
#[derive(Clone)]
pub struct AppState {
    /// The store that holds the sale transactions.
    pub transaction_store: Arc<dyn TransactionStore>,

    /// The client used to reload the transactions from the seed snapshot.
    pub seed_client: SeedClient,

    /// The config that controls how to split transactions into pages.
    pub pagination_config: PaginationConfig,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for the domain models.
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized.
    pub fn new(
        db_connection: Connection,
        seed_client: SeedClient,
        pagination_config: PaginationConfig,
    ) -> Result<Self, Error> {
        initialize(&db_connection)?;

        let connection = Arc::new(Mutex::new(db_connection));

        Ok(Self::with_store(
            Arc::new(SQLiteTransactionStore::new(connection)),
            seed_client,
            pagination_config,
        ))
    }

    /// Create a new [AppState] backed by an existing `transaction_store`.
    pub fn with_store(
        transaction_store: Arc<dyn TransactionStore>,
        seed_client: SeedClient,
        pagination_config: PaginationConfig,
    ) -> Self {
        Self {
            transaction_store,
            seed_client,
            pagination_config,
        }
    }
}
