//! Ledger schema migration runner.
//!
//! Usage:
//!   migrator up      - Create the accounts, entries, and transfers tables
//!   migrator down    - Drop the ledger tables
//!   migrator status  - Show migration status
//!   migrator fresh   - Drop everything and re-create the ledger schema
//!
//! Reads `DATABASE_URL` (or `.env`). The URL may point at PostgreSQL or SQLite.

use ledgerbank_db::migration::Migrator;
use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // The migrator CLI installs its own tracing subscriber.
    cli::run_cli(Migrator).await;
}
