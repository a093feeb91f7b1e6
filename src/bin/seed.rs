use std::{
    error::Error,
    sync::{Arc, Mutex},
    time::Duration,
};

use clap::Parser;
use rusqlite::Connection;
use tracing_subscriber::EnvFilter;

use sales_insights::{
    DEFAULT_SEED_URL, SQLiteTransactionStore, SeedClient, TransactionStore, initialize_db,
    load_seed_data,
};

/// A utility for loading the seed snapshot into a sales_insights database
/// without starting the server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the SQLite database. It is created if it does not exist.
    #[arg(long)]
    db_path: String,

    /// The URL of the JSON snapshot to load.
    #[arg(long, default_value = DEFAULT_SEED_URL)]
    seed_url: String,

    /// How long to wait for the snapshot before giving up, in seconds.
    #[arg(long, default_value_t = 30)]
    seed_timeout_secs: u64,
}

/// Replace the transactions in a database with the seed snapshot.
#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    println!("Opening database at {:#?}", args.db_path);
    let conn = Connection::open(&args.db_path)?;
    initialize_db(&conn)?;

    let store: Arc<dyn TransactionStore> =
        Arc::new(SQLiteTransactionStore::new(Arc::new(Mutex::new(conn))));
    let seed_client = SeedClient::new(&args.seed_url, Duration::from_secs(args.seed_timeout_secs))?;

    println!("Loading transactions from {}...", args.seed_url);
    let count = load_seed_data(&store, &seed_client).await?;

    println!("Success! Loaded {count} transactions.");

    Ok(())
}
