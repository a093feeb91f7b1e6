//! Maps the records in the seed snapshot to [Transaction]s.

use serde::Deserialize;
use serde_json::Value;
use time::OffsetDateTime;

use crate::{Error, transaction::Transaction};

/// A sale record as it appears in the seed snapshot.
///
/// The snapshot has used both `title`/`description` and
/// `productTitle`/`productDescription`, so both spellings are accepted.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSaleRecord {
    #[serde(default)]
    id: Option<RawId>,
    #[serde(alias = "productTitle")]
    title: String,
    #[serde(alias = "productDescription", default)]
    description: Option<String>,
    price: RawNumber,
    #[serde(with = "time::serde::rfc3339")]
    date_of_sale: OffsetDateTime,
    category: String,
    sold: RawFlag,
    #[serde(default)]
    image: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(serde_json::Number),
    Text(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Number(f64),
    Text(String),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawFlag {
    Bool(bool),
    Text(String),
}

impl RawSaleRecord {
    /// Records without an id are numbered by their one-based `position`.
    fn into_transaction(self, position: usize) -> Result<Transaction, String> {
        let id = match self.id {
            Some(RawId::Number(number)) => number.to_string(),
            Some(RawId::Text(text)) => text,
            None => position.to_string(),
        };

        let price = match self.price {
            RawNumber::Number(price) => price,
            RawNumber::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| format!("price \"{text}\" is not a number"))?,
        };

        if !price.is_finite() {
            return Err(format!("price {price} is not a finite number"));
        }

        // Textual flags only count as sold when they are exactly "true".
        let sold = match self.sold {
            RawFlag::Bool(sold) => sold,
            RawFlag::Text(text) => text == "true",
        };

        Ok(Transaction {
            id,
            title: self.title,
            price,
            description: self.description,
            date_of_sale: self.date_of_sale,
            category: self.category,
            sold,
            image: self.image,
        })
    }
}

/// Parse the seed snapshot, a JSON array of sale records.
///
/// # Errors
/// Returns [Error::InvalidSeedRecord] naming the first record, by its
/// one-based position, that is missing a required field or has a malformed value. No
/// records are returned in that case.
pub(crate) fn parse_seed_payload(payload: &[u8]) -> Result<Vec<Transaction>, Error> {
    let records: Vec<Value> = serde_json::from_slice(payload)
        .map_err(|error| Error::InvalidSeedRecord(format!("expected a JSON array: {error}")))?;

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            let position = index + 1;

            serde_json::from_value::<RawSaleRecord>(record)
                .map_err(|error| error.to_string())
                .and_then(|record| record.into_transaction(position))
                .map_err(|message| Error::InvalidSeedRecord(format!("record {position}: {message}")))
        })
        .collect()
}
