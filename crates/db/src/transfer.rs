//! Transfer coordinator.
//!
//! Runs one funds transfer as a single database transaction:
//! lock both account rows in ascending id order, append the transfer record
//! and its two journal entries, apply both balance deltas in the same order,
//! then commit. Any failure rolls the whole unit of work back.

use std::time::Duration;

use ledgerbank_core::ledger::{
    ErrorClass, Reconciliation, TransferRequest, TransferResult, TransferValidationError,
};
use ledgerbank_shared::{AppError, TransferConfig, types::AccountId};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbBackend, DbErr,
    EntityTrait, QueryFilter, QuerySelect, TransactionTrait, sea_query::Expr,
};
use tracing::{debug, info, warn};

use crate::entities::entries;
use crate::repositories::{
    AccountRepository, EntryRepository, StoreError, TransferRecordRepository,
};

/// Error types for transfer operations.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    /// The request failed validation; nothing was written.
    #[error(transparent)]
    Invalid(#[from] TransferValidationError),

    /// A store call failed; the unit of work was rolled back.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<DbErr> for TransferError {
    fn from(err: DbErr) -> Self {
        Self::Store(StoreError::Database(err))
    }
}

impl TransferError {
    /// Classifies this error for retry decisions.
    #[must_use]
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Invalid(err) => err.class(),
            Self::Store(err) => err.class(),
        }
    }

    /// Whether the caller may retry the same transfer.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        self.class().is_retryable()
    }
}

impl From<TransferError> for AppError {
    fn from(err: TransferError) -> Self {
        let message = err.to_string();
        match err.class() {
            ErrorClass::Rejected => Self::Validation(message),
            ErrorClass::NotFound => Self::NotFound(message),
            ErrorClass::Transient => Self::Conflict(message),
            ErrorClass::Fatal => Self::Database(message),
        }
    }
}

/// Transfer coordinator.
///
/// Holds no mutable state; concurrent calls share only the connection pool.
#[derive(Debug, Clone)]
pub struct TransferService {
    db: DatabaseConnection,
    lock_timeout: Option<Duration>,
}

impl TransferService {
    /// Creates a transfer service with the server's default lock wait.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            lock_timeout: None,
        }
    }

    /// Creates a transfer service from configuration.
    #[must_use]
    pub fn with_config(db: DatabaseConnection, config: &TransferConfig) -> Self {
        Self {
            db,
            lock_timeout: config.lock_timeout_ms.map(Duration::from_millis),
        }
    }

    /// Moves `amount` from one account to another.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The accounts are the same or `amount` is not positive
    /// - Either account does not exist
    /// - Any database operation fails (nothing is committed)
    pub async fn transfer(
        &self,
        from_account_id: AccountId,
        to_account_id: AccountId,
        amount: i64,
    ) -> Result<TransferResult, TransferError> {
        let request = TransferRequest::new(from_account_id, to_account_id, amount)?;
        self.execute(request).await
    }

    /// Executes a transfer request.
    ///
    /// `TransferRequest` can only be built through validation, so distinct ids
    /// and a positive amount hold on entry and nothing is re-checked here.
    ///
    /// # Errors
    ///
    /// Returns an error if either account does not exist or any database
    /// operation fails. Nothing is committed in that case.
    pub async fn execute(&self, request: TransferRequest) -> Result<TransferResult, TransferError> {
        let txn = self.db.begin().await?;

        match self.run(&txn, &request).await {
            Ok(result) => {
                txn.commit().await?;
                info!(
                    transfer_id = %result.transfer.id,
                    from_account_id = %request.from_account_id(),
                    to_account_id = %request.to_account_id(),
                    amount = request.amount(),
                    "Transfer committed"
                );
                Ok(result)
            }
            Err(err) => {
                warn!(
                    from_account_id = %request.from_account_id(),
                    to_account_id = %request.to_account_id(),
                    amount = request.amount(),
                    error = %err,
                    "Transfer failed, rolling back"
                );
                if let Err(rollback_err) = txn.rollback().await {
                    warn!(error = %rollback_err, "Rollback failed");
                }
                Err(err)
            }
        }
    }

    /// Every step of a transfer, inside one unit of work.
    async fn run(
        &self,
        txn: &DatabaseTransaction,
        request: &TransferRequest,
    ) -> Result<TransferResult, TransferError> {
        self.set_lock_timeout(txn).await?;

        let plan = request.plan();
        let [first, second] = plan.lock_order();

        for change in [first, second] {
            AccountRepository::lock_for_update(txn, change.account_id).await?;
            debug!(account_id = %change.account_id, "Account locked");
        }

        let transfer = TransferRecordRepository::append(
            txn,
            request.from_account_id(),
            request.to_account_id(),
            request.amount(),
        )
        .await?;

        let from_entry =
            EntryRepository::append(txn, plan.debit().account_id, plan.debit().delta).await?;
        let to_entry =
            EntryRepository::append(txn, plan.credit().account_id, plan.credit().delta).await?;

        let first_account = AccountRepository::apply_delta(txn, first.account_id, first.delta).await?;
        let second_account =
            AccountRepository::apply_delta(txn, second.account_id, second.delta).await?;

        let (from_account, to_account) = if first.account_id == request.from_account_id() {
            (first_account, second_account)
        } else {
            (second_account, first_account)
        };

        Ok(TransferResult {
            transfer,
            from_entry,
            to_entry,
            from_account,
            to_account,
        })
    }

    /// Bounds how long this unit of work may wait on a row lock.
    async fn set_lock_timeout(&self, txn: &DatabaseTransaction) -> Result<(), DbErr> {
        let Some(timeout) = self.lock_timeout else {
            return Ok(());
        };
        if txn.get_database_backend() != DbBackend::Postgres {
            return Ok(());
        }

        txn.execute_unprepared(&format!(
            "SET LOCAL lock_timeout = '{}ms'",
            timeout.as_millis()
        ))
        .await?;
        Ok(())
    }

    /// Compares an account's stored balance with the sum of its journal entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the account does not exist or a query fails.
    pub async fn reconcile(&self, account_id: AccountId) -> Result<Reconciliation, TransferError> {
        let txn = self.db.begin().await?;

        let account = AccountRepository::lock_for_update(&txn, account_id).await?;
        let (journal_total, entry_count) = entries::Entity::find()
            .select_only()
            .column_as(
                Expr::cust("CAST(COALESCE(SUM(amount), 0) AS BIGINT)"),
                "journal_total",
            )
            .column_as(Expr::cust("COUNT(*)"), "entry_count")
            .filter(entries::Column::AccountId.eq(account_id.into_inner()))
            .into_tuple::<(i64, i64)>()
            .one(&txn)
            .await?
            .unwrap_or((0, 0));

        txn.commit().await?;

        Ok(Reconciliation {
            account_id,
            balance: account.balance,
            journal_total,
            entry_count: entry_count.unsigned_abs(),
        })
    }
}
