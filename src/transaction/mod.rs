//! Sale transactions.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and the table that stores it
//! - The `Predicate` filter type and the builders for month and search filters
//! - The `TransactionStore` trait and its SQLite implementation
//! - The handler for the paginated transaction list

mod core;
mod list;
mod predicate;
mod query;
mod store;

pub use core::{Transaction, TransactionBuilder, create_transaction_table};
pub use list::{TransactionListState, TransactionPage, list_transactions_endpoint};
pub use predicate::{NumericField, Predicate, TextField};
pub use store::{CategoryCount, SQLiteTransactionStore, SaleTotals, TransactionStore};

pub(crate) use query::month_predicate;
pub(crate) use store::spawn_query;
