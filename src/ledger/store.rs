//! Loads and saves the ledger CSV file.

use std::path::{Path, PathBuf};

use crate::{
    Error,
    ledger::record::{LEDGER_COLUMNS, TransactionRecord},
    table::{read_table, write_table},
};

/// The ledger file on disk.
#[derive(Debug, Clone)]
pub struct LedgerStore {
    path: PathBuf,
}

impl LedgerStore {
    /// Create a store for the ledger at `path`. The file does not need to exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The location of the ledger file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every transaction in the ledger.
    ///
    /// A missing or empty file is an empty ledger.
    ///
    /// # Errors
    ///
    /// Returns an [Error::Io] or [Error::InvalidCSV] if the file exists but
    /// could not be read.
    pub fn load(&self) -> Result<Vec<TransactionRecord>, Error> {
        read_table(&self.path)
    }

    /// Overwrite the ledger file with `ledger`.
    ///
    /// # Errors
    ///
    /// Returns an [Error::Io] if the file could not be written.
    pub fn save(&self, ledger: &[TransactionRecord]) -> Result<(), Error> {
        write_table(&self.path, &LEDGER_COLUMNS, ledger)
    }

    /// Add `record` to the end of `ledger` and save the result.
    pub fn append(
        &self,
        record: TransactionRecord,
        mut ledger: Vec<TransactionRecord>,
    ) -> Result<Vec<TransactionRecord>, Error> {
        ledger.push(record);
        self.save(&ledger)?;

        Ok(ledger)
    }

    /// Remove the row at `index` from `ledger` and save the result.
    ///
    /// # Errors
    ///
    /// Returns [Error::DeleteMissingTransaction] without touching the file if
    /// `index` is past the end of `ledger`.
    pub fn delete_at(
        &self,
        index: usize,
        mut ledger: Vec<TransactionRecord>,
    ) -> Result<Vec<TransactionRecord>, Error> {
        if index >= ledger.len() {
            return Err(Error::DeleteMissingTransaction);
        }

        ledger.remove(index);
        self.save(&ledger)?;

        Ok(ledger)
    }
}
