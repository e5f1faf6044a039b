//! Ledger entry domain type.

use chrono::{DateTime, Utc};
use ledgerbank_shared::types::{AccountId, EntryId};
use serde::{Deserialize, Serialize};

/// An immutable signed-amount journal line attributing a balance change to one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Unique identifier for this entry.
    pub id: EntryId,
    /// The account affected by this entry.
    pub account_id: AccountId,
    /// Signed amount: negative for a debit, positive for a credit.
    pub amount: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Entry {
    /// Returns true if this entry takes value out of the account.
    #[must_use]
    pub const fn is_debit(&self) -> bool {
        self.amount < 0
    }

    /// Returns true if this entry adds value to the account.
    #[must_use]
    pub const fn is_credit(&self) -> bool {
        self.amount > 0
    }
}
