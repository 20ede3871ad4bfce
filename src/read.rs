use crate::data::{Error, LoadError, Transaction, TransactionRecord};
use std::{io::Read, path::Path};

/// Which parser a transaction source needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SourceFormat {
    Json,
    Csv,
}

impl SourceFormat {
    /// `.csv` files are CSV, everything else is assumed to be JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension() {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => SourceFormat::Csv,
            _ => SourceFormat::Json,
        }
    }
}

/// A record that was dropped on the way in. `index` is its 0-based position in
/// the source.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct SkippedRecord {
    pub index: usize,
    pub error: Error,
}

/// Everything a source gave us: the good transactions, and the records we had
/// to leave behind.
#[derive(Debug, Default)]
pub(crate) struct LoadedBatch {
    pub transactions: Vec<Transaction>,
    pub skipped: Vec<SkippedRecord>,
}

impl LoadedBatch {
    fn push(&mut self, index: usize, tx: Result<Transaction, Error>) {
        match tx {
            Ok(tx) => {
                tracing::debug!("Loaded transaction {tx} ({})", tx.description);
                self.transactions.push(tx);
            }
            Err(error) => {
                tracing::warn!("Skipping record #{}: {error}", index + 1);
                self.skipped.push(SkippedRecord { index, error });
            }
        }
    }
}

/// Parses a whole transaction list. A source that can't be parsed at all is an
/// error; a single bad record only costs that record.
pub(crate) fn read_transactions<R: Read>(
    reader: R,
    format: SourceFormat,
) -> Result<LoadedBatch, LoadError> {
    let mut batch = LoadedBatch::default();
    match format {
        SourceFormat::Json => {
            // Validated record by record, a broken one only costs itself.
            let values: Vec<serde_json::Value> = serde_json::from_reader(reader)?;
            for (index, value) in values.into_iter().enumerate() {
                let tx = serde_json::from_value::<TransactionRecord>(value)
                    .map_err(|e| Error::InvalidRecord(e.to_string()))
                    .and_then(Transaction::try_from);
                batch.push(index, tx);
            }
        }
        SourceFormat::Csv => {
            let mut rdr = csv::ReaderBuilder::new()
                .trim(csv::Trim::All)
                .from_reader(reader);
            // Fail early on an unreadable header rather than on every row.
            rdr.headers()?;
            for (index, result) in rdr.deserialize::<TransactionRecord>().enumerate() {
                let tx = result
                    .map_err(|e| Error::InvalidRecord(e.to_string()))
                    .and_then(Transaction::try_from);
                batch.push(index, tx);
            }
        }
    }
    Ok(batch)
}

/// Reads and parses the transaction file at `path`.
pub(crate) fn try_load_transactions(path: &Path) -> Result<LoadedBatch, LoadError> {
    let content = std::fs::read(path).map_err(|source| match source.kind() {
        std::io::ErrorKind::NotFound => LoadError::NotFound(path.to_owned()),
        _ => LoadError::Io {
            path: path.to_owned(),
            source,
        },
    })?;
    read_transactions(&content[..], SourceFormat::from_path(path))
}

/// Like `try_load_transactions`, except it never fails: whatever goes wrong
/// is logged and we carry on with nothing.
pub(crate) fn load_transactions(path: &Path) -> LoadedBatch {
    match try_load_transactions(path) {
        Ok(batch) => {
            tracing::info!(
                "Loaded {} transaction(s) from {}",
                batch.transactions.len(),
                path.display()
            );
            batch
        }
        Err(e) => {
            tracing::error!("Failed to load transactions: {e}");
            LoadedBatch::default()
        }
    }
}
