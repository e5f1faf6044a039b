//! Transfer request, record, and composed result.

use chrono::{DateTime, Utc};
use ledgerbank_shared::types::{AccountId, TransferId};
use serde::{Deserialize, Serialize};

use super::account::Account;
use super::entry::Entry;
use super::error::TransferValidationError;
use super::plan::TransferPlan;

/// A validated request to move `amount` from one account to another.
///
/// Only [`TransferRequest::new`] and deserialization build one, and both
/// validate, so every value holds distinct ids and a positive amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedTransferRequest")]
pub struct TransferRequest {
    from_account_id: AccountId,
    to_account_id: AccountId,
    amount: i64,
}

/// Wire shape of a transfer request before validation.
#[derive(Deserialize)]
struct UncheckedTransferRequest {
    from_account_id: AccountId,
    to_account_id: AccountId,
    amount: i64,
}

impl TryFrom<UncheckedTransferRequest> for TransferRequest {
    type Error = TransferValidationError;

    fn try_from(raw: UncheckedTransferRequest) -> Result<Self, Self::Error> {
        Self::new(raw.from_account_id, raw.to_account_id, raw.amount)
    }
}

impl TransferRequest {
    /// Validates and builds a transfer request.
    ///
    /// # Errors
    ///
    /// Returns an error if both ids are equal or `amount` is not positive.
    pub fn new(
        from_account_id: AccountId,
        to_account_id: AccountId,
        amount: i64,
    ) -> Result<Self, TransferValidationError> {
        if from_account_id == to_account_id {
            return Err(TransferValidationError::SameAccount(from_account_id));
        }
        if amount <= 0 {
            return Err(TransferValidationError::NonPositiveAmount(amount));
        }

        Ok(Self {
            from_account_id,
            to_account_id,
            amount,
        })
    }

    /// Account to debit.
    #[must_use]
    pub const fn from_account_id(&self) -> AccountId {
        self.from_account_id
    }

    /// Account to credit.
    #[must_use]
    pub const fn to_account_id(&self) -> AccountId {
        self.to_account_id
    }

    /// Magnitude moved, in minor units. Always positive.
    #[must_use]
    pub const fn amount(&self) -> i64 {
        self.amount
    }

    /// Builds the balance-change plan for this request.
    #[must_use]
    pub fn plan(&self) -> TransferPlan {
        TransferPlan::new(self)
    }
}

/// The durable record of one funds movement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    /// Unique identifier.
    pub id: TransferId,
    /// Debited account.
    pub from_account_id: AccountId,
    /// Credited account.
    pub to_account_id: AccountId,
    /// Magnitude moved (always positive).
    pub amount: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Transfer {
    /// Returns true if `account_id` is the source or the destination.
    #[must_use]
    pub fn involves(&self, account_id: AccountId) -> bool {
        self.from_account_id == account_id || self.to_account_id == account_id
    }
}

/// Everything a committed transfer wrote, as it was committed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferResult {
    /// The transfer record.
    pub transfer: Transfer,
    /// Debit entry on the source account.
    pub from_entry: Entry,
    /// Credit entry on the destination account.
    pub to_entry: Entry,
    /// Source account after the transfer.
    pub from_account: Account,
    /// Destination account after the transfer.
    pub to_account: Account,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_valid_request() {
        let request = TransferRequest::new(AccountId::new(1), AccountId::new(2), 10).unwrap();
        assert_eq!(request.from_account_id(), AccountId::new(1));
        assert_eq!(request.to_account_id(), AccountId::new(2));
        assert_eq!(request.amount(), 10);
    }

    #[test]
    fn test_same_account_rejected() {
        let result = TransferRequest::new(AccountId::new(4), AccountId::new(4), 10);
        assert_eq!(
            result,
            Err(TransferValidationError::SameAccount(AccountId::new(4)))
        );
    }

    #[rstest]
    #[case(0)]
    #[case(-1)]
    #[case(i64::MIN)]
    fn test_non_positive_amount_rejected(#[case] amount: i64) {
        let result = TransferRequest::new(AccountId::new(1), AccountId::new(2), amount);
        assert_eq!(
            result,
            Err(TransferValidationError::NonPositiveAmount(amount))
        );
    }

    #[test]
    fn test_deserialize_valid_request() {
        let request: TransferRequest =
            serde_json::from_str(r#"{"from_account_id":1,"to_account_id":2,"amount":10}"#)
                .unwrap();
        assert_eq!(
            request,
            TransferRequest::new(AccountId::new(1), AccountId::new(2), 10).unwrap()
        );

        let json = serde_json::to_value(request).unwrap();
        assert_eq!(json["amount"], 10);
    }

    #[rstest]
    #[case::minimum_amount(r#"{"from_account_id":1,"to_account_id":2,"amount":-9223372036854775808}"#)]
    #[case::zero_amount(r#"{"from_account_id":1,"to_account_id":2,"amount":0}"#)]
    #[case::same_account(r#"{"from_account_id":5,"to_account_id":5,"amount":10}"#)]
    fn test_deserialize_rejects_invalid_request(#[case] json: &str) {
        let result = serde_json::from_str::<TransferRequest>(json);
        assert!(result.is_err(), "Accepted invalid request: {json}");
    }

    #[test]
    fn test_transfer_involves() {
        let transfer = Transfer {
            id: TransferId::new(1),
            from_account_id: AccountId::new(1),
            to_account_id: AccountId::new(2),
            amount: 5,
            created_at: Utc::now(),
        };
        assert!(transfer.involves(AccountId::new(1)));
        assert!(transfer.involves(AccountId::new(2)));
        assert!(!transfer.involves(AccountId::new(3)));
    }

    #[test]
    fn test_result_serializes_with_named_sides() {
        let now = Utc::now();
        let account = |id: i64, balance: i64| Account {
            id: AccountId::new(id),
            owner: "alice".to_string(),
            balance,
            currency: "USD".to_string(),
            created_at: now,
        };
        let result = TransferResult {
            transfer: Transfer {
                id: TransferId::new(9),
                from_account_id: AccountId::new(1),
                to_account_id: AccountId::new(2),
                amount: 10,
                created_at: now,
            },
            from_entry: Entry {
                id: ledgerbank_shared::types::EntryId::new(1),
                account_id: AccountId::new(1),
                amount: -10,
                created_at: now,
            },
            to_entry: Entry {
                id: ledgerbank_shared::types::EntryId::new(2),
                account_id: AccountId::new(2),
                amount: 10,
                created_at: now,
            },
            from_account: account(1, 90),
            to_account: account(2, 110),
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["transfer"]["amount"], 10);
        assert_eq!(json["from_entry"]["amount"], -10);
        assert_eq!(json["to_entry"]["amount"], 10);
        assert_eq!(json["from_account"]["balance"], 90);
        assert_eq!(json["to_account"]["balance"], 110);
    }
}
