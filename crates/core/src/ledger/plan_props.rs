//! Property-based tests for transfer planning.
//!
//! Covers the lock-ordering and conservation rules every coordinator relies on.

use ledgerbank_shared::types::AccountId;
use proptest::prelude::*;

use super::transfer::TransferRequest;

/// Strategy for a pair of distinct account ids.
fn distinct_ids() -> impl Strategy<Value = (i64, i64)> {
    (1i64..1_000_000, 1i64..1_000_000).prop_filter("ids must differ", |(a, b)| a != b)
}

/// Strategy for a positive amount in minor units.
fn positive_amount() -> impl Strategy<Value = i64> {
    1i64..=i64::MAX
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Locks are always acquired in strictly ascending id order.
    #[test]
    fn prop_lock_order_is_ascending((from, to) in distinct_ids(), amount in positive_amount()) {
        let request = TransferRequest::new(AccountId::new(from), AccountId::new(to), amount).unwrap();
        let [first, second] = request.plan().lock_order();
        prop_assert!(first.account_id < second.account_id);
    }

    /// A transfer and its reverse lock the same rows in the same order.
    #[test]
    fn prop_direction_does_not_change_lock_order((a, b) in distinct_ids(), amount in positive_amount()) {
        let forward = TransferRequest::new(AccountId::new(a), AccountId::new(b), amount).unwrap();
        let backward = TransferRequest::new(AccountId::new(b), AccountId::new(a), amount).unwrap();

        let forward_ids = forward.plan().lock_order().map(|change| change.account_id);
        let backward_ids = backward.plan().lock_order().map(|change| change.account_id);
        prop_assert_eq!(forward_ids, backward_ids);
    }

    /// The two balance changes cancel out: value is moved, never created.
    #[test]
    fn prop_changes_conserve_value((from, to) in distinct_ids(), amount in positive_amount()) {
        let plan = TransferRequest::new(AccountId::new(from), AccountId::new(to), amount)
            .unwrap()
            .plan();
        let [first, second] = plan.lock_order();

        prop_assert_eq!(first.delta.checked_add(second.delta), Some(0));
        prop_assert_eq!(plan.debit().delta, -amount);
        prop_assert_eq!(plan.credit().delta, amount);
        prop_assert_eq!(plan.debit().account_id, AccountId::new(from));
        prop_assert_eq!(plan.credit().account_id, AccountId::new(to));
    }

    /// Non-positive amounts never produce a plan.
    #[test]
    fn prop_non_positive_amount_rejected((from, to) in distinct_ids(), amount in i64::MIN..=0) {
        prop_assert!(TransferRequest::new(AccountId::new(from), AccountId::new(to), amount).is_err());
    }
}
