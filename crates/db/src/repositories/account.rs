//! Account repository: balances, row locks, and atomic deltas.
//!
//! `lock_for_update` and `apply_delta` take the connection explicitly so they
//! run inside whatever unit of work the caller has open. Both touch a single
//! row by primary key and never escalate beyond a row lock.

use chrono::Utc;
use ledgerbank_core::ledger::Account;
use ledgerbank_shared::types::{AccountId, PageRequest, PageResponse};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
    sea_query::Expr,
};
use tracing::debug;

use super::entry::EntryRepository;
use super::error::StoreError;
use crate::entities::accounts;

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct CreateAccountInput {
    /// Username of the owner.
    pub owner: String,
    /// Currency code.
    pub currency: String,
    /// Opening balance in minor units, journaled as the first entry.
    pub opening_balance: i64,
}

/// Account repository.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an account.
    ///
    /// A non-zero opening balance is written as an opening journal entry in the
    /// same database transaction, so the balance always equals the journal total.
    pub async fn create_account(&self, input: CreateAccountInput) -> Result<Account, StoreError> {
        let txn = self.db.begin().await?;

        let account = accounts::ActiveModel {
            owner: Set(input.owner),
            balance: Set(input.opening_balance),
            currency: Set(input.currency),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        if input.opening_balance != 0 {
            EntryRepository::append(&txn, AccountId::new(account.id), input.opening_balance)
                .await?;
        }

        txn.commit().await?;

        debug!(
            account_id = account.id,
            balance = account.balance,
            "Account created"
        );
        Ok(account.into())
    }

    /// Gets an account by ID.
    pub async fn get_account(&self, id: AccountId) -> Result<Account, StoreError> {
        accounts::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .map(Account::from)
            .ok_or(StoreError::AccountNotFound(id))
    }

    /// Lists an owner's accounts ordered by ID.
    pub async fn list_accounts(
        &self,
        owner: &str,
        page: PageRequest,
    ) -> Result<PageResponse<Account>, StoreError> {
        let query = accounts::Entity::find().filter(accounts::Column::Owner.eq(owner));

        let total = query.clone().count(&self.db).await?;
        let accounts = query
            .order_by_asc(accounts::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok(PageResponse::new(
            accounts.into_iter().map(Account::from).collect(),
            page,
            total,
        ))
    }

    /// Reads an account and holds an exclusive row lock on it until the unit of work ends.
    ///
    /// Backends without row locks (SQLite) serialize writers at the database level instead.
    pub async fn lock_for_update<C>(conn: &C, id: AccountId) -> Result<Account, StoreError>
    where
        C: ConnectionTrait,
    {
        accounts::Entity::find_by_id(id.into_inner())
            .lock_exclusive()
            .one(conn)
            .await?
            .map(Account::from)
            .ok_or(StoreError::AccountNotFound(id))
    }

    /// Adds `delta` to an account balance in a single statement and returns the new row.
    pub async fn apply_delta<C>(conn: &C, id: AccountId, delta: i64) -> Result<Account, StoreError>
    where
        C: ConnectionTrait,
    {
        let result = accounts::Entity::update_many()
            .col_expr(
                accounts::Column::Balance,
                Expr::col(accounts::Column::Balance).add(delta),
            )
            .filter(accounts::Column::Id.eq(id.into_inner()))
            .exec(conn)
            .await?;

        if result.rows_affected == 0 {
            return Err(StoreError::AccountNotFound(id));
        }

        // Re-read inside the same unit of work; the row lock keeps it stable.
        accounts::Entity::find_by_id(id.into_inner())
            .one(conn)
            .await?
            .map(Account::from)
            .ok_or(StoreError::AccountNotFound(id))
    }
}
