//! Journal reconciliation.

use ledgerbank_shared::types::AccountId;
use serde::{Deserialize, Serialize};

/// Comparison of an account's stored balance against its journal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reconciliation {
    /// The account checked.
    pub account_id: AccountId,
    /// Balance stored on the account row.
    pub balance: i64,
    /// Sum of every journal entry for the account.
    pub journal_total: i64,
    /// Number of journal entries for the account.
    pub entry_count: u64,
}

impl Reconciliation {
    /// Returns true if the stored balance matches the journal.
    #[must_use]
    pub const fn is_consistent(&self) -> bool {
        self.balance == self.journal_total
    }

    /// Stored balance minus journal total; zero when consistent.
    #[must_use]
    pub const fn drift(&self) -> i64 {
        self.balance.saturating_sub(self.journal_total)
    }
}
