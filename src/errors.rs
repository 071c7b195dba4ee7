use std::io;

use thiserror::Error;

/// Rejected caller input. Raised before any mutation or persistence write.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("amount must be a finite number greater than zero")]
    InvalidAmount,
    #[error("invalid date `{0}`, expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("unknown period mode `{0}`")]
    UnknownPeriodMode(String),
    #[error("month {0} is outside 1-12")]
    InvalidMonth(u32),
    #[error("category must not be empty")]
    EmptyCategory,
    #[error("amount total exceeds the supported range")]
    AmountOverflow,
}

/// Failures of the persistence medium or of the data it holds.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("persisted ledger is corrupt: {0}")]
    CorruptData(String),
    #[error("failed to write ledger: {0}")]
    WriteFailure(String),
    #[error("failed to read ledger: {0}")]
    ReadFailure(String),
}

/// Error type returned by every ledger operation.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Failures reading or writing the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Serialization error: {0}")]
    Serde(String),
}

impl LedgerError {
    pub fn is_corrupt_data(&self) -> bool {
        matches!(self, LedgerError::Storage(StorageError::CorruptData(_)))
    }

    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            LedgerError::Validation(err) => Some(err),
            LedgerError::Storage(_) => None,
        }
    }
}
