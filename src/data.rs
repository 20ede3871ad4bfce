use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::{fmt, path::PathBuf};
use thiserror::Error;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// What a transaction says about itself when the source didn't say anything.
pub const NO_DESCRIPTION: &str = "(no description)";

/// Largest amount, either way, a single transaction may carry. Keeps any
/// realistic number of them summable without overflowing a `Decimal`.
pub const MAX_AMOUNT: Decimal = dec!(1000000000000000);

/// One input record, exactly as it appears in the source. `date`, `amount` and
/// `category` are mandatory, `description` isn't; anything else in the record is
/// ignored. It's never used as-is: it has to go through `Transaction::new` first,
/// which is where the actual validation happens.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct TransactionRecord {
    pub date: String,
    pub amount: Decimal,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// A validated transaction. Negative amounts are expenses, everything else
/// (zero included) is income. The category is kept verbatim, so "Food" and
/// "food " are two different categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Transaction {
    pub date: NaiveDate,
    pub amount: Decimal,
    pub category: String,
    pub description: String,
}

impl Transaction {
    pub fn new(
        date: &str,
        amount: Decimal,
        category: impl Into<String>,
        description: Option<String>,
    ) -> Result<Self, Error> {
        let date = NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|source| {
            Error::InvalidDate {
                date: date.to_owned(),
                source,
            }
        })?;
        if amount.abs() > MAX_AMOUNT {
            return Err(Error::AmountOutOfRange(amount));
        }
        let description = description
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| NO_DESCRIPTION.to_owned());
        Ok(Self {
            date,
            amount,
            category: category.into(),
            description,
        })
    }

    pub fn is_expense(&self) -> bool {
        self.amount < Decimal::ZERO
    }
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = Error;

    fn try_from(record: TransactionRecord) -> Result<Self, Self::Error> {
        Self::new(
            &record.date,
            record.amount,
            record.category,
            record.description,
        )
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} on {}", self.amount, self.category, self.date)
    }
}

/// Why a single record was rejected. The rest of its batch is unaffected.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid date {date:?}, expected YYYY-MM-DD ({source})")]
    InvalidDate {
        date: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error("Amount {0} is out of range (at most {} either way)", MAX_AMOUNT)]
    AmountOutOfRange(Decimal),
    #[error("Record doesn't match the transaction schema: {0}")]
    InvalidRecord(String),
}

/// Why a whole source couldn't be read. These never reach `main`: the loader
/// logs them and hands back an empty batch instead.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Transaction file {0} not found")]
    NotFound(PathBuf),
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed JSON transaction list: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Malformed CSV transaction list: {0}")]
    Csv(#[from] csv::Error),
}
