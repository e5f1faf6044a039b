//! Ledger schema migration.
//!
//! Creates the accounts, entries, and transfers tables. Entries and transfers
//! are append-only: triggers reject every UPDATE and DELETE on them.
//!
//! PostgreSQL is the production backend; SQLite is supported for local runs and tests.

use sea_orm::DbBackend;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let statements = match manager.get_database_backend() {
            DbBackend::Postgres => POSTGRES_UP,
            DbBackend::Sqlite => SQLITE_UP,
            backend => {
                return Err(DbErr::Migration(format!("{backend:?} is not supported")));
            }
        };

        let db = manager.get_connection();
        for sql in statements {
            db.execute_unprepared(sql).await?;
        }
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        let drop_sql = match manager.get_database_backend() {
            DbBackend::Postgres => POSTGRES_DOWN,
            _ => SQLITE_DOWN,
        };
        for sql in drop_sql {
            db.execute_unprepared(sql).await?;
        }
        Ok(())
    }
}

// ============================================================
// POSTGRESQL
// ============================================================

const POSTGRES_UP: &[&str] = &[
    PG_ACCOUNTS_SQL,
    PG_ENTRIES_SQL,
    PG_TRANSFERS_SQL,
    PG_APPEND_ONLY_SQL,
];

const PG_ACCOUNTS_SQL: &str = r"
CREATE TABLE accounts (
    id BIGSERIAL PRIMARY KEY,
    owner VARCHAR(255) NOT NULL,
    balance BIGINT NOT NULL,
    currency VARCHAR(3) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_accounts_owner ON accounts(owner, id);
";

const PG_ENTRIES_SQL: &str = r"
CREATE TABLE entries (
    id BIGSERIAL PRIMARY KEY,
    account_id BIGINT NOT NULL REFERENCES accounts(id),
    amount BIGINT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_entries_nonzero CHECK (amount <> 0)
);

CREATE INDEX idx_entries_account ON entries(account_id, id);
";

const PG_TRANSFERS_SQL: &str = r"
CREATE TABLE transfers (
    id BIGSERIAL PRIMARY KEY,
    from_account_id BIGINT NOT NULL REFERENCES accounts(id),
    to_account_id BIGINT NOT NULL REFERENCES accounts(id),
    amount BIGINT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_transfers_positive CHECK (amount > 0),
    CONSTRAINT chk_transfers_distinct CHECK (from_account_id <> to_account_id)
);

CREATE INDEX idx_transfers_from ON transfers(from_account_id, id);
CREATE INDEX idx_transfers_to ON transfers(to_account_id, id);
";

const PG_APPEND_ONLY_SQL: &str = r"
-- ============================================================
-- FUNCTION: reject_journal_mutation
-- Entries and transfers are the audit trail and never change.
-- ============================================================
CREATE OR REPLACE FUNCTION reject_journal_mutation()
RETURNS TRIGGER AS $$
BEGIN
    RAISE EXCEPTION '% rows are append-only', TG_TABLE_NAME;
END;
$$ LANGUAGE plpgsql;

CREATE TRIGGER trg_entries_append_only
BEFORE UPDATE OR DELETE ON entries
FOR EACH ROW
EXECUTE FUNCTION reject_journal_mutation();

CREATE TRIGGER trg_transfers_append_only
BEFORE UPDATE OR DELETE ON transfers
FOR EACH ROW
EXECUTE FUNCTION reject_journal_mutation();
";

const POSTGRES_DOWN: &[&str] = &[r"
DROP TABLE IF EXISTS transfers CASCADE;
DROP TABLE IF EXISTS entries CASCADE;
DROP TABLE IF EXISTS accounts CASCADE;
DROP FUNCTION IF EXISTS reject_journal_mutation();
"];

// ============================================================
// SQLITE
// One statement per item; triggers carry their own semicolons.
// ============================================================

const SQLITE_UP: &[&str] = &[
    r"
CREATE TABLE accounts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    owner TEXT NOT NULL,
    balance BIGINT NOT NULL,
    currency TEXT NOT NULL,
    created_at TEXT NOT NULL
)",
    "CREATE INDEX idx_accounts_owner ON accounts(owner, id)",
    r"
CREATE TABLE entries (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    account_id BIGINT NOT NULL REFERENCES accounts(id),
    amount BIGINT NOT NULL CHECK (amount <> 0),
    created_at TEXT NOT NULL
)",
    "CREATE INDEX idx_entries_account ON entries(account_id, id)",
    r"
CREATE TABLE transfers (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    from_account_id BIGINT NOT NULL REFERENCES accounts(id),
    to_account_id BIGINT NOT NULL REFERENCES accounts(id),
    amount BIGINT NOT NULL CHECK (amount > 0),
    created_at TEXT NOT NULL,
    CHECK (from_account_id <> to_account_id)
)",
    "CREATE INDEX idx_transfers_from ON transfers(from_account_id, id)",
    "CREATE INDEX idx_transfers_to ON transfers(to_account_id, id)",
    r"
CREATE TRIGGER trg_entries_no_update BEFORE UPDATE ON entries
BEGIN
    SELECT RAISE(ABORT, 'entries rows are append-only');
END",
    r"
CREATE TRIGGER trg_entries_no_delete BEFORE DELETE ON entries
BEGIN
    SELECT RAISE(ABORT, 'entries rows are append-only');
END",
    r"
CREATE TRIGGER trg_transfers_no_update BEFORE UPDATE ON transfers
BEGIN
    SELECT RAISE(ABORT, 'transfers rows are append-only');
END",
    r"
CREATE TRIGGER trg_transfers_no_delete BEFORE DELETE ON transfers
BEGIN
    SELECT RAISE(ABORT, 'transfers rows are append-only');
END",
];

const SQLITE_DOWN: &[&str] = &[
    "DROP TABLE IF EXISTS transfers",
    "DROP TABLE IF EXISTS entries",
    "DROP TABLE IF EXISTS accounts",
];
