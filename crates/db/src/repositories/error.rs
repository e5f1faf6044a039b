//! Storage error type and driver error classification.

use ledgerbank_core::ledger::ErrorClass;
use ledgerbank_shared::types::{AccountId, EntryId, TransferId};
use sea_orm::{DbErr, RuntimeErr};

/// SQLSTATE codes PostgreSQL raises for conflicts that clear on retry.
const PG_TRANSIENT_STATES: &[&str] = &[
    "40001", // serialization_failure
    "40P01", // deadlock_detected
    "55P03", // lock_not_available (lock_timeout)
    "57014", // query_canceled (statement_timeout)
    "53300", // too_many_connections
];

/// SQLite result codes for busy or locked databases, including extended codes.
const SQLITE_TRANSIENT_CODES: &[&str] = &["5", "6", "261", "262", "517"];

/// Error types for store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// Ledger entry not found.
    #[error("Entry not found: {0}")]
    EntryNotFound(EntryId),

    /// Transfer record not found.
    #[error("Transfer not found: {0}")]
    TransferNotFound(TransferId),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl StoreError {
    /// Classifies this error for retry decisions.
    #[must_use]
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::AccountNotFound(_) | Self::EntryNotFound(_) | Self::TransferNotFound(_) => {
                ErrorClass::NotFound
            }
            Self::Database(err) => classify_db_err(err),
        }
    }
}

/// Classifies a raw database error.
///
/// Connection and pool failures, lock timeouts, serialization failures, and
/// deadlocks are transient. Everything else is fatal.
#[must_use]
pub fn classify_db_err(err: &DbErr) -> ErrorClass {
    match err {
        DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => ErrorClass::Transient,
        DbErr::RecordNotFound(_) => ErrorClass::NotFound,
        DbErr::Exec(RuntimeErr::SqlxError(err)) | DbErr::Query(RuntimeErr::SqlxError(err)) => {
            classify_sqlx_err(err)
        }
        _ => ErrorClass::Fatal,
    }
}

fn classify_sqlx_err(err: &sqlx::Error) -> ErrorClass {
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            ErrorClass::Transient
        }
        sqlx::Error::Database(db_err) => match db_err.code() {
            Some(code) if is_transient_code(&code) => ErrorClass::Transient,
            _ => ErrorClass::Fatal,
        },
        _ => ErrorClass::Fatal,
    }
}

fn is_transient_code(code: &str) -> bool {
    PG_TRANSIENT_STATES.contains(&code)
        || SQLITE_TRANSIENT_CODES.contains(&code)
        || code.starts_with("08") // connection_exception class
}
