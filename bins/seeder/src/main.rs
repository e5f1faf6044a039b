//! Seeds demo accounts and transfers for local development.
//!
//! Runs pending migrations, opens a few funded accounts, moves money between
//! them in both directions, and reconciles every account against its journal.
//!
//! Usage: cargo run --bin seeder

use anyhow::{Context, bail};
use ledgerbank_core::ledger::{Account, TransferResult};
use ledgerbank_db::migration::{Migrator, MigratorTrait};
use ledgerbank_db::{AccountRepository, CreateAccountInput, TransferService, connect_with};
use ledgerbank_shared::types::{AccountId, PageRequest};
use ledgerbank_shared::{AppConfig, AppError, AppResult};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Attempts per demo transfer before a conflict is reported.
const MAX_ATTEMPTS: u32 = 3;

/// Demo owners with their opening balances in minor units.
const DEMO_ACCOUNTS: &[(&str, i64)] = &[("alice", 100_000), ("bob", 50_000), ("carol", 0)];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ledgerbank=debug,seeder=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let db = connect_with(&config.database)
        .await
        .context("Failed to connect to database")?;
    info!("Connected to database");

    Migrator::up(&db, None)
        .await
        .context("Failed to run migrations")?;

    let accounts = AccountRepository::new(db.clone());
    let mut seeded = Vec::with_capacity(DEMO_ACCOUNTS.len());
    for &(owner, opening_balance) in DEMO_ACCOUNTS {
        seeded.push(seed_account(&accounts, owner, opening_balance).await?);
    }

    let [alice, bob, carol] = seeded.as_slice() else {
        bail!("expected {} demo accounts", DEMO_ACCOUNTS.len());
    };

    let service = TransferService::with_config(db.clone(), &config.transfer);
    for (from, to, amount) in [
        (alice, bob, 2_500),
        (bob, alice, 1_000),
        (alice, carol, 7_500),
        (carol, bob, 500),
    ] {
        let result = transfer_with_retry(&service, from.id, to.id, amount).await?;
        info!(
            transfer_id = %result.transfer.id,
            from = %from.owner,
            to = %to.owner,
            amount,
            from_balance = result.from_account.balance,
            to_balance = result.to_account.balance,
            "Demo transfer"
        );
    }

    for account in &seeded {
        let report = service.reconcile(account.id).await?;
        if report.is_consistent() {
            info!(
                account_id = %account.id,
                balance = report.balance,
                entries = report.entry_count,
                "Account reconciled"
            );
        } else {
            warn!(
                account_id = %account.id,
                drift = report.drift(),
                "Balance does not match journal"
            );
        }
    }

    info!("Seeding complete");
    Ok(())
}

/// Returns the owner's first account, creating it if the owner has none.
async fn seed_account(
    accounts: &AccountRepository,
    owner: &str,
    opening_balance: i64,
) -> anyhow::Result<Account> {
    let existing = accounts
        .list_accounts(owner, PageRequest::new(1, 1))
        .await?;
    if let Some(account) = existing.data.into_iter().next() {
        info!(owner, account_id = %account.id, "Account already exists, skipping");
        return Ok(account);
    }

    let account = accounts
        .create_account(CreateAccountInput {
            owner: owner.to_string(),
            currency: "USD".to_string(),
            opening_balance,
        })
        .await?;
    info!(owner, account_id = %account.id, opening_balance, "Account seeded");
    Ok(account)
}

/// Runs one transfer, retrying while the failure is a retryable conflict.
async fn transfer_with_retry(
    service: &TransferService,
    from: AccountId,
    to: AccountId,
    amount: i64,
) -> AppResult<TransferResult> {
    let mut attempt = 1;
    loop {
        match service.transfer(from, to, amount).await.map_err(AppError::from) {
            Err(err) if err.is_retryable() && attempt < MAX_ATTEMPTS => {
                warn!(attempt, error = %err, "Transfer conflicted, retrying");
                attempt += 1;
            }
            result => return result,
        }
    }
}
