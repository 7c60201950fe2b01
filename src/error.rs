//! Errors for the account form store.
//!
//! Store operations themselves are total: updating or deleting an unknown
//! account is a no-op, not an error. The variants here cover:
//! - Persistence failures (I/O, serialization)
//! - Listing output failures (CSV)
//! - Setup failures (no async runtime for the write coalescer)
//! - Command-level lookups and parsing done by the runner

use thiserror::Error;

use crate::dto::AccountId;

#[derive(Debug, Error)]
pub enum Error {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("no async runtime available to schedule writes")]
    NoRuntime,

    #[error("account {0} not found")]
    AccountNotFound(AccountId),

    #[error("invalid account type: {0}")]
    InvalidAccountType(String),
}
