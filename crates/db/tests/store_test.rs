//! Integration tests for the account, entry, and transfer record stores.

mod common;

use ledgerbank_db::{
    AccountRepository, CreateAccountInput, EntryRepository, StoreError, TransferRecordRepository,
};
use ledgerbank_shared::types::{AccountId, EntryId, PageRequest, TransferId};
use rstest::rstest;
use sea_orm::{ConnectionTrait, TransactionTrait};

use common::{balance_of, entry_count, open_account, setup_db};

// ============================================================================
// Accounts
// ============================================================================

#[rstest]
#[case::funded(250, 1)]
#[case::empty(0, 0)]
#[tokio::test]
async fn test_create_account_journals_opening_balance(
    #[case] opening_balance: i64,
    #[case] expected_entries: u64,
) {
    let db = setup_db().await;
    let repo = AccountRepository::new(db.clone());

    let account = repo
        .create_account(CreateAccountInput {
            owner: "alice".to_string(),
            currency: "EUR".to_string(),
            opening_balance,
        })
        .await
        .expect("Failed to create account");

    assert_eq!(account.owner, "alice");
    assert_eq!(account.currency, "EUR");
    assert_eq!(account.balance, opening_balance);
    assert_eq!(entry_count(&db).await, expected_entries);

    let fetched = repo.get_account(account.id).await.unwrap();
    assert_eq!(fetched, account);
}

#[tokio::test]
async fn test_get_missing_account() {
    let db = setup_db().await;

    let err = AccountRepository::new(db)
        .get_account(AccountId::new(99))
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::AccountNotFound(id) if id == AccountId::new(99)));
}

#[tokio::test]
async fn test_list_accounts_by_owner_paginates() {
    let db = setup_db().await;
    for balance in [10, 20, 30] {
        open_account(&db, "alice", balance).await;
    }
    open_account(&db, "bob", 40).await;
    let repo = AccountRepository::new(db.clone());

    let first = repo
        .list_accounts("alice", PageRequest::new(1, 2))
        .await
        .unwrap();
    assert_eq!(first.meta.total, 3);
    assert_eq!(first.meta.total_pages, 2);
    assert_eq!(
        first.data.iter().map(|a| a.balance).collect::<Vec<_>>(),
        vec![10, 20]
    );

    let second = repo
        .list_accounts("alice", PageRequest::new(2, 2))
        .await
        .unwrap();
    assert_eq!(second.data.len(), 1);
    assert_eq!(second.data[0].balance, 30);

    let nobody = repo
        .list_accounts("carol", PageRequest::default())
        .await
        .unwrap();
    assert!(nobody.data.is_empty());
    assert_eq!(nobody.meta.total, 0);
}

// ============================================================================
// Row-level primitives
// ============================================================================

#[tokio::test]
async fn test_apply_delta_adds_to_current_balance() {
    let db = setup_db().await;
    let alice = open_account(&db, "alice", 100).await;

    let txn = db.begin().await.unwrap();
    let locked = AccountRepository::lock_for_update(&txn, alice.id)
        .await
        .unwrap();
    assert_eq!(locked.balance, 100);

    let after_debit = AccountRepository::apply_delta(&txn, alice.id, -30)
        .await
        .unwrap();
    assert_eq!(after_debit.balance, 70);
    let after_credit = AccountRepository::apply_delta(&txn, alice.id, 5)
        .await
        .unwrap();
    assert_eq!(after_credit.balance, 75);
    txn.commit().await.unwrap();

    assert_eq!(balance_of(&db, &alice).await, 75);
}

#[tokio::test]
async fn test_uncommitted_delta_is_discarded() {
    let db = setup_db().await;
    let alice = open_account(&db, "alice", 100).await;

    let txn = db.begin().await.unwrap();
    AccountRepository::apply_delta(&txn, alice.id, 500)
        .await
        .unwrap();
    EntryRepository::append(&txn, alice.id, 500).await.unwrap();
    txn.rollback().await.unwrap();

    assert_eq!(balance_of(&db, &alice).await, 100);
    assert_eq!(entry_count(&db).await, 1);
}

#[tokio::test]
async fn test_row_primitives_report_missing_account() {
    let db = setup_db().await;
    let ghost = AccountId::new(7);

    let err = AccountRepository::lock_for_update(&db, ghost)
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::AccountNotFound(id) if id == ghost));

    let err = AccountRepository::apply_delta(&db, ghost, 10)
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::AccountNotFound(id) if id == ghost));
}

// ============================================================================
// Entry journal
// ============================================================================

#[tokio::test]
async fn test_entry_append_and_get() {
    let db = setup_db().await;
    let alice = open_account(&db, "alice", 0).await;

    let entry = EntryRepository::append(&db, alice.id, -42).await.unwrap();
    assert_eq!(entry.account_id, alice.id);
    assert_eq!(entry.amount, -42);
    assert!(entry.is_debit());

    let fetched = EntryRepository::new(db.clone())
        .get_entry(entry.id)
        .await
        .unwrap();
    assert_eq!(fetched, entry);
}

#[tokio::test]
async fn test_get_missing_entry() {
    let db = setup_db().await;

    let err = EntryRepository::new(db)
        .get_entry(EntryId::new(1))
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::EntryNotFound(_)));
}

#[tokio::test]
async fn test_entry_journal_is_append_only() {
    let db = setup_db().await;
    let alice = open_account(&db, "alice", 100).await;

    let update = db
        .execute_unprepared("UPDATE entries SET amount = 1")
        .await;
    assert!(update.is_err(), "Entries must not be updatable");

    let delete = db.execute_unprepared("DELETE FROM entries").await;
    assert!(delete.is_err(), "Entries must not be deletable");

    let journal = EntryRepository::new(db.clone())
        .list_entries(alice.id, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(journal.data.len(), 1);
    assert_eq!(journal.data[0].amount, 100);
}

#[tokio::test]
async fn test_zero_amount_entry_rejected_by_schema() {
    let db = setup_db().await;
    let alice = open_account(&db, "alice", 100).await;

    let err = EntryRepository::append(&db, alice.id, 0).await.unwrap_err();

    assert!(matches!(err, StoreError::Database(_)));
}

// ============================================================================
// Transfer records
// ============================================================================

#[tokio::test]
async fn test_transfer_record_append_get_and_list() {
    let db = setup_db().await;
    let alice = open_account(&db, "alice", 0).await;
    let bob = open_account(&db, "bob", 0).await;
    let carol = open_account(&db, "carol", 0).await;

    let outgoing = TransferRecordRepository::append(&db, alice.id, bob.id, 10)
        .await
        .unwrap();
    let incoming = TransferRecordRepository::append(&db, carol.id, alice.id, 20)
        .await
        .unwrap();
    TransferRecordRepository::append(&db, bob.id, carol.id, 30)
        .await
        .unwrap();

    let repo = TransferRecordRepository::new(db.clone());
    assert_eq!(repo.get_transfer(outgoing.id).await.unwrap(), outgoing);

    let page = repo
        .list_transfers(alice.id, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.meta.total, 2);
    assert_eq!(page.data, vec![outgoing, incoming]);
}

#[tokio::test]
async fn test_get_missing_transfer() {
    let db = setup_db().await;

    let err = TransferRecordRepository::new(db)
        .get_transfer(TransferId::new(3))
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::TransferNotFound(_)));
}

#[tokio::test]
async fn test_self_transfer_record_rejected_by_schema() {
    let db = setup_db().await;
    let alice = open_account(&db, "alice", 0).await;

    let err = TransferRecordRepository::append(&db, alice.id, alice.id, 10)
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::Database(_)));
}
