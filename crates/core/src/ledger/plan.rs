//! Balance-change planning and lock ordering.
//!
//! Every transfer touches exactly two account rows. Acquiring their locks in
//! ascending id order, whatever the transfer direction, gives all transfers the
//! same global acquisition order, so two transfers over the same pair can never
//! each hold the row the other is waiting for.

use ledgerbank_shared::types::AccountId;
use serde::{Deserialize, Serialize};

use super::transfer::TransferRequest;

/// A signed balance change on one account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceChange {
    /// The account to change.
    pub account_id: AccountId,
    /// Amount added to the balance (negative for a debit).
    pub delta: i64,
}

/// The two balance changes of a transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferPlan {
    debit: BalanceChange,
    credit: BalanceChange,
}

impl TransferPlan {
    /// Plans the balance changes for a validated request.
    #[must_use]
    pub fn new(request: &TransferRequest) -> Self {
        Self {
            debit: BalanceChange {
                account_id: request.from_account_id(),
                delta: -request.amount(),
            },
            credit: BalanceChange {
                account_id: request.to_account_id(),
                delta: request.amount(),
            },
        }
    }

    /// The change on the source account.
    #[must_use]
    pub const fn debit(&self) -> BalanceChange {
        self.debit
    }

    /// The change on the destination account.
    #[must_use]
    pub const fn credit(&self) -> BalanceChange {
        self.credit
    }

    /// Both changes in ascending account-id order.
    ///
    /// This is the order in which rows must be locked and updated.
    #[must_use]
    pub fn lock_order(&self) -> [BalanceChange; 2] {
        if self.debit.account_id < self.credit.account_id {
            [self.debit, self.credit]
        } else {
            [self.credit, self.debit]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(from: i64, to: i64, amount: i64) -> TransferPlan {
        TransferRequest::new(AccountId::new(from), AccountId::new(to), amount)
            .unwrap()
            .plan()
    }

    #[test]
    fn test_debit_and_credit_sides() {
        let plan = plan(7, 3, 25);
        assert_eq!(plan.debit(), BalanceChange { account_id: AccountId::new(7), delta: -25 });
        assert_eq!(plan.credit(), BalanceChange { account_id: AccountId::new(3), delta: 25 });
    }

    #[test]
    fn test_lock_order_when_source_is_lower() {
        let [first, second] = plan(1, 2, 10).lock_order();
        assert_eq!(first, BalanceChange { account_id: AccountId::new(1), delta: -10 });
        assert_eq!(second, BalanceChange { account_id: AccountId::new(2), delta: 10 });
    }

    #[test]
    fn test_lock_order_when_source_is_higher() {
        let [first, second] = plan(2, 1, 10).lock_order();
        assert_eq!(first, BalanceChange { account_id: AccountId::new(1), delta: 10 });
        assert_eq!(second, BalanceChange { account_id: AccountId::new(2), delta: -10 });
    }
}
