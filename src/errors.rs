use std::path::PathBuf;

use thiserror::Error;

/// Error type that captures common ledger failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("malformed timestamp `{input}` (expected YYYY-MM-DD HH:MM:SS)")]
    MalformedTimestamp { input: String },
    #[error("malformed record: {reason}")]
    MalformedRecord { reason: String },
    #[error("store `{path}` unavailable: {source}")]
    StoreUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

impl LedgerError {
    pub fn malformed_record(reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            reason: reason.into(),
        }
    }
}
