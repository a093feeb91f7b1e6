//! Defines the transaction store trait and its SQLite implementation.

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, params_from_iter, types::Value};
use serde::Serialize;

use crate::Error;

use super::{
    core::{TRANSACTION_COLUMNS, Transaction, insert_transaction, map_transaction_row},
    predicate::Predicate,
};

/// Sums over a set of transactions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleTotals {
    /// The sum of the prices, sold or not.
    pub total_sale_amount: f64,
    /// The number of sold products.
    pub total_sold_items: u64,
    /// The number of unsold products.
    pub total_not_sold_items: u64,
}

/// The number of transactions in a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    /// The category name.
    #[serde(rename = "_id")]
    pub category: String,
    /// How many transactions are in the category.
    pub items: u64,
}

/// Reads, aggregates and replaces transactions.
///
/// Implementations provide their own synchronisation, callers may share one
/// store between threads and call it concurrently.
pub trait TransactionStore: Send + Sync {
    /// Count the transactions matching `filter`.
    fn count(&self, filter: &Predicate) -> Result<u64, Error>;

    /// Get up to `limit` transactions matching `filter`, skipping the first
    /// `offset`, in insertion order.
    fn get_page(&self, filter: &Predicate, offset: u64, limit: u64)
    -> Result<Vec<Transaction>, Error>;

    /// Sum the prices and count sold and unsold transactions matching `filter`.
    ///
    /// An empty selection yields all zeros.
    fn totals(&self, filter: &Predicate) -> Result<SaleTotals, Error>;

    /// Count the transactions matching `filter` in each category.
    ///
    /// Categories without matches are omitted. Results are sorted by category.
    fn count_by_category(&self, filter: &Predicate) -> Result<Vec<CategoryCount>, Error>;

    /// Delete every transaction and insert `transactions` in their place.
    ///
    /// Returns the number of transactions inserted.
    fn replace_all(&self, transactions: &[Transaction]) -> Result<usize, Error>;
}

/// Run a store call on the blocking thread pool.
///
/// # Errors
/// Returns the error from `query`, or [Error::TaskFailed] if the task
/// panicked or was cancelled.
pub(crate) async fn spawn_query<T, F>(store: &Arc<dyn TransactionStore>, query: F) -> Result<T, Error>
where
    T: Send + 'static,
    F: FnOnce(&dyn TransactionStore) -> Result<T, Error> + Send + 'static,
{
    let store = Arc::clone(store);

    tokio::task::spawn_blocking(move || query(store.as_ref()))
        .await
        .map_err(|error| Error::TaskFailed(error.to_string()))?
}

/// Stores transactions in a SQLite database.
///
/// The database must be set up with [crate::initialize_db] first.
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)
    }
}

impl TransactionStore for SQLiteTransactionStore {
    fn count(&self, filter: &Predicate) -> Result<u64, Error> {
        let filter = filter.to_sql();
        let query = format!(
            "SELECT COUNT(id) FROM \"transaction\" WHERE {}",
            filter.clause
        );

        let count: i64 = self
            .lock()?
            .prepare(&query)?
            .query_row(params_from_iter(filter.params.iter()), |row| row.get(0))?;

        Ok(count as u64)
    }

    /// Query for a page of transactions in the database.
    ///
    /// Rows are ordered by their primary key so that consecutive pages do not
    /// overlap.
    ///
    /// # Errors
    /// This function will return a [Error::SqlError] there is a SQL error.
    fn get_page(
        &self,
        filter: &Predicate,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Transaction>, Error> {
        let mut filter = filter.to_sql();
        let query = format!(
            "SELECT {TRANSACTION_COLUMNS} FROM \"transaction\" WHERE {} ORDER BY id ASC LIMIT ?{} OFFSET ?{}",
            filter.clause,
            filter.params.len() + 1,
            filter.params.len() + 2,
        );
        filter.params.push(to_sql_integer(limit));
        filter.params.push(to_sql_integer(offset));

        self.lock()?
            .prepare(&query)?
            .query_map(params_from_iter(filter.params.iter()), map_transaction_row)?
            .map(|transaction_result| transaction_result.map_err(Error::SqlError))
            .collect()
    }

    fn totals(&self, filter: &Predicate) -> Result<SaleTotals, Error> {
        let filter = filter.to_sql();
        let query = format!(
            "SELECT TOTAL(price), COALESCE(SUM(sold), 0), COALESCE(SUM(1 - sold), 0)
             FROM \"transaction\" WHERE {}",
            filter.clause
        );

        let totals = self.lock()?.prepare(&query)?.query_row(
            params_from_iter(filter.params.iter()),
            |row| {
                Ok(SaleTotals {
                    total_sale_amount: row.get(0)?,
                    total_sold_items: row.get::<_, i64>(1)? as u64,
                    total_not_sold_items: row.get::<_, i64>(2)? as u64,
                })
            },
        )?;

        Ok(totals)
    }

    fn count_by_category(&self, filter: &Predicate) -> Result<Vec<CategoryCount>, Error> {
        let filter = filter.to_sql();
        let query = format!(
            "SELECT category, COUNT(id) FROM \"transaction\" WHERE {}
             GROUP BY category ORDER BY category ASC",
            filter.clause
        );

        self.lock()?
            .prepare(&query)?
            .query_map(params_from_iter(filter.params.iter()), |row| {
                Ok(CategoryCount {
                    category: row.get(0)?,
                    items: row.get::<_, i64>(1)? as u64,
                })
            })?
            .map(|count_result| count_result.map_err(Error::SqlError))
            .collect()
    }

    /// Replace every transaction inside a single SQL transaction.
    ///
    /// If any insert fails the previous transactions are kept.
    fn replace_all(&self, transactions: &[Transaction]) -> Result<usize, Error> {
        let connection = self.lock()?;
        let tx = connection.unchecked_transaction()?;

        let deleted = tx.execute("DELETE FROM \"transaction\"", ())?;

        for transaction in transactions {
            insert_transaction(transaction, &tx)?;
        }

        tx.commit()?;

        tracing::info!(
            "replaced {deleted} transactions with {} new transactions",
            transactions.len()
        );

        Ok(transactions.len())
    }
}

fn to_sql_integer(value: u64) -> Value {
    Value::Integer(i64::try_from(value).unwrap_or(i64::MAX))
}
