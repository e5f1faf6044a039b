//! Account domain type.

use chrono::{DateTime, Utc};
use ledgerbank_shared::types::AccountId;
use serde::{Deserialize, Serialize};

/// A funds-holding account.
///
/// `balance` is kept in minor currency units and always equals the sum of the
/// account's journal entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier.
    pub id: AccountId,
    /// Username of the owner.
    pub owner: String,
    /// Current balance in minor units.
    pub balance: i64,
    /// Currency code, fixed at creation.
    pub currency: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
