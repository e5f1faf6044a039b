//! Funds-transfer ledger logic.
//!
//! This module implements the storage-independent half of a transfer:
//! - Domain records (accounts, entries, transfers, composed results)
//! - Request validation
//! - The ascending-id lock plan shared by every coordinator
//! - Error classification for retry decisions
//! - Journal reconciliation

pub mod account;
pub mod entry;
pub mod error;
pub mod plan;
pub mod reconcile;
pub mod transfer;

#[cfg(test)]
mod plan_props;

pub use account::Account;
pub use entry::Entry;
pub use error::{ErrorClass, TransferValidationError};
pub use plan::{BalanceChange, TransferPlan};
pub use reconcile::Reconciliation;
pub use transfer::{Transfer, TransferRequest, TransferResult};
