//! Loads the whole transaction data set from a remote JSON snapshot.

mod client;
mod endpoint;
mod record;

pub use client::SeedClient;
pub use endpoint::{SeedState, initialize_endpoint, load_seed_data, replace_transactions};

/// The snapshot the database is seeded from unless another URL is configured.
pub const DEFAULT_SEED_URL: &str =
    "https://s3.amazonaws.com/roxiler.com/product_transaction.json";
