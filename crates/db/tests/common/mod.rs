//! Shared fixtures for ledger integration tests.
//!
//! Every test gets its own in-memory SQLite database with migrations applied.
//! The pool holds exactly one connection, so the database survives for the
//! whole test and concurrent units of work serialize on it.

#![allow(dead_code)]

use std::time::Duration;

use ledgerbank_core::ledger::Account;
use ledgerbank_db::entities::{accounts, entries, transfers};
use ledgerbank_db::migration::{Migrator, MigratorTrait};
use ledgerbank_db::{AccountRepository, CreateAccountInput};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, EntityTrait, PaginatorTrait};

pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(Duration::from_secs(3600))
        .max_lifetime(Duration::from_secs(3600))
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .expect("Failed to connect to database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

pub async fn open_account(db: &DatabaseConnection, owner: &str, balance: i64) -> Account {
    AccountRepository::new(db.clone())
        .create_account(CreateAccountInput {
            owner: owner.to_string(),
            currency: "USD".to_string(),
            opening_balance: balance,
        })
        .await
        .expect("Failed to create account")
}

pub async fn balance_of(db: &DatabaseConnection, account: &Account) -> i64 {
    accounts::Entity::find_by_id(account.id.into_inner())
        .one(db)
        .await
        .expect("Failed to read account")
        .expect("Account disappeared")
        .balance
}

pub async fn transfer_count(db: &DatabaseConnection) -> u64 {
    transfers::Entity::find()
        .count(db)
        .await
        .expect("Failed to count transfers")
}

pub async fn entry_count(db: &DatabaseConnection) -> u64 {
    entries::Entity::find()
        .count(db)
        .await
        .expect("Failed to count entries")
}
