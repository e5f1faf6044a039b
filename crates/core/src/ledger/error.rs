//! Transfer error types and classification.
//!
//! Storage layers map their failures onto [`ErrorClass`] so callers can decide
//! between retrying and reporting without inspecting driver errors.

use ledgerbank_shared::types::AccountId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How a failed transfer should be handled by its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorClass {
    /// The request itself is invalid and will never succeed.
    Rejected,
    /// A referenced account does not exist.
    NotFound,
    /// Connection, lock-timeout, serialization, or deadlock failure. Retry.
    Transient,
    /// Any other storage failure. Report.
    Fatal,
}

impl ErrorClass {
    /// Whether the same request may succeed when re-attempted.
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(self, Self::Transient)
    }
}

/// Errors raised while validating a transfer request, before any storage access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferValidationError {
    /// Source and destination are the same account.
    #[error("Cannot transfer from account {0} to itself")]
    SameAccount(AccountId),

    /// Amount is zero or negative.
    #[error("Transfer amount must be positive, got {0}")]
    NonPositiveAmount(i64),
}

impl TransferValidationError {
    /// Validation failures are never retryable.
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        ErrorClass::Rejected
    }
}
