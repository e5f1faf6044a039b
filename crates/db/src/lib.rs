//! Database layer with `SeaORM` entities, repositories, and the transfer coordinator.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - Account, entry journal, and transfer record repositories
//! - The transfer coordinator
//! - Database migrations

pub mod entities;
pub mod migration;
pub mod repositories;
pub mod transfer;

pub use repositories::{
    AccountRepository, CreateAccountInput, EntryRepository, StoreError, TransferRecordRepository,
};
pub use transfer::{TransferError, TransferService};

use std::time::Duration;

use ledgerbank_shared::DatabaseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Establishes a connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}

/// Establishes a pooled connection using the configured pool settings.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect_with(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .sqlx_logging(config.sqlx_logging);

    Database::connect(options).await
}
