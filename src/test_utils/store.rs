use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use time::macros::datetime;

use crate::{
    Error,
    db::initialize,
    transaction::{
        CategoryCount, Predicate, SQLiteTransactionStore, SaleTotals, Transaction,
        TransactionStore,
    },
};

pub(crate) fn get_sqlite_store() -> SQLiteTransactionStore {
    let conn = Connection::open_in_memory().unwrap();
    initialize(&conn).unwrap();
    SQLiteTransactionStore::new(Arc::new(Mutex::new(conn)))
}

pub(crate) fn get_test_store() -> Arc<dyn TransactionStore> {
    Arc::new(get_sqlite_store())
}

/// Three March sales from different years priced 50 (sold), 150 (unsold) and
/// 999 (sold), plus one April sale that should never show up in March.
pub(crate) fn march_scenario_store() -> Arc<dyn TransactionStore> {
    let store = get_test_store();
    store
        .replace_all(&[
            Transaction::build("1", "Mug", 50.0, datetime!(2021-03-01 09:00 UTC), "kitchen")
                .sold(true)
                .finalize(),
            Transaction::build("2", "Lamp", 150.0, datetime!(2022-03-15 12:00 UTC), "home")
                .finalize(),
            Transaction::build("3", "Laptop", 999.0, datetime!(2019-03-31 23:00 UTC), "electronics")
                .sold(true)
                .finalize(),
            Transaction::build("4", "Kettle", 75.0, datetime!(2021-04-01 09:00 UTC), "kitchen")
                .sold(true)
                .finalize(),
        ])
        .unwrap();
    store
}

/// The store operation that a [FailingStore] fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StoreOperation {
    Count,
    GetPage,
    Totals,
    CountByCategory,
    ReplaceAll,
}

/// A store that returns an SQL error for one operation and otherwise behaves
/// like an empty SQLite store.
pub(crate) struct FailingStore {
    inner: SQLiteTransactionStore,
    fail_on: StoreOperation,
}

impl FailingStore {
    pub(crate) fn new(fail_on: StoreOperation) -> Self {
        Self {
            inner: get_sqlite_store(),
            fail_on,
        }
    }

    fn check(&self, operation: StoreOperation) -> Result<(), Error> {
        if self.fail_on == operation {
            Err(Error::SqlError(rusqlite::Error::InvalidQuery))
        } else {
            Ok(())
        }
    }
}

impl TransactionStore for FailingStore {
    fn count(&self, filter: &Predicate) -> Result<u64, Error> {
        self.check(StoreOperation::Count)?;
        self.inner.count(filter)
    }

    fn get_page(
        &self,
        filter: &Predicate,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Transaction>, Error> {
        self.check(StoreOperation::GetPage)?;
        self.inner.get_page(filter, offset, limit)
    }

    fn totals(&self, filter: &Predicate) -> Result<SaleTotals, Error> {
        self.check(StoreOperation::Totals)?;
        self.inner.totals(filter)
    }

    fn count_by_category(&self, filter: &Predicate) -> Result<Vec<CategoryCount>, Error> {
        self.check(StoreOperation::CountByCategory)?;
        self.inner.count_by_category(filter)
    }

    fn replace_all(&self, transactions: &[Transaction]) -> Result<usize, Error> {
        self.check(StoreOperation::ReplaceAll)?;
        self.inner.replace_all(transactions)
    }
}
