//! Defines the core data model and table schema for sale transactions.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, UtcOffset};

// ============================================================================
// MODELS
// ============================================================================

/// The sale of a single product.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The identifier assigned by the source of the data, not the database.
    pub id: String,
    /// The product name.
    pub title: String,
    /// The sale price of the product.
    pub price: f64,
    /// A longer description of the product.
    pub description: Option<String>,
    /// When the product was sold.
    ///
    /// Only the month of this timestamp, taken in UTC, is used for filtering.
    #[serde(with = "time::serde::rfc3339")]
    pub date_of_sale: OffsetDateTime,
    /// The product category, e.g. "electronics".
    pub category: String,
    /// Whether the product has been sold.
    pub sold: bool,
    /// A URL to an image of the product.
    pub image: Option<String>,
}

impl Transaction {
    /// Create a new transaction with the required fields.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability. The transaction
    /// defaults to unsold with no description or image.
    pub fn build(
        id: &str,
        title: &str,
        price: f64,
        date_of_sale: OffsetDateTime,
        category: &str,
    ) -> TransactionBuilder {
        TransactionBuilder {
            id: id.to_owned(),
            title: title.to_owned(),
            price,
            description: None,
            date_of_sale,
            category: category.to_owned(),
            sold: false,
            image: None,
        }
    }

    /// The month of the sale, 1 to 12, in UTC.
    pub fn sale_month(&self) -> u8 {
        self.date_of_sale.to_offset(UtcOffset::UTC).month().into()
    }
}

/// A builder for creating [Transaction] instances.
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    id: String,
    title: String,
    price: f64,
    description: Option<String>,
    date_of_sale: OffsetDateTime,
    category: String,
    sold: bool,
    image: Option<String>,
}

impl TransactionBuilder {
    /// Set the description for the transaction.
    pub fn description(mut self, description: Option<&str>) -> Self {
        self.description = description.map(str::to_owned);
        self
    }

    /// Set whether the product was sold.
    pub fn sold(mut self, sold: bool) -> Self {
        self.sold = sold;
        self
    }

    /// Set the image URL for the transaction.
    pub fn image(mut self, image: Option<&str>) -> Self {
        self.image = image.map(str::to_owned);
        self
    }

    /// Create the [Transaction].
    pub fn finalize(self) -> Transaction {
        Transaction {
            id: self.id,
            title: self.title,
            price: self.price,
            description: self.description,
            date_of_sale: self.date_of_sale,
            category: self.category,
            sold: self.sold,
            image: self.image,
        }
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// The columns selected when reading a [Transaction], in the order expected by
/// [map_transaction_row].
pub(crate) const TRANSACTION_COLUMNS: &str =
    "external_id, title, price, description, date_of_sale, category, sold, image";

/// Create the transaction table in the database.
///
/// `sale_month` duplicates the UTC month of `date_of_sale` so month filters
/// can use an index.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                external_id TEXT NOT NULL,
                title TEXT NOT NULL,
                price REAL NOT NULL,
                description TEXT,
                date_of_sale TEXT NOT NULL,
                sale_month INTEGER NOT NULL CHECK (sale_month BETWEEN 1 AND 12),
                category TEXT NOT NULL,
                sold INTEGER NOT NULL,
                image TEXT
                )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_sale_month ON \"transaction\"(sale_month);",
        (),
    )?;

    Ok(())
}

/// Insert `transaction` using `connection`.
///
/// The date of sale is stored in UTC.
pub(crate) fn insert_transaction(
    transaction: &Transaction,
    connection: &Connection,
) -> Result<(), rusqlite::Error> {
    connection
        .prepare_cached(
            "INSERT INTO \"transaction\"
             (external_id, title, price, description, date_of_sale, sale_month, category, sold, image)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )?
        .execute((
            &transaction.id,
            &transaction.title,
            transaction.price,
            &transaction.description,
            transaction.date_of_sale.to_offset(UtcOffset::UTC),
            transaction.sale_month(),
            &transaction.category,
            transaction.sold,
            &transaction.image,
        ))?;

    Ok(())
}

/// Map a database row selected with [TRANSACTION_COLUMNS] to a Transaction.
pub(crate) fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        title: row.get(1)?,
        price: row.get(2)?,
        description: row.get(3)?,
        date_of_sale: row.get(4)?,
        category: row.get(5)?,
        sold: row.get(6)?,
        image: row.get(7)?,
    })
}

// ============================================================================
// TESTS
// ============================================================================
