#![allow(missing_docs)]

pub(crate) mod http;
pub(crate) mod store;

pub(crate) use http::{serve_json, serve_status};
pub(crate) use store::{
    FailingStore, StoreOperation, get_sqlite_store, get_test_store, march_scenario_store,
};
