//! Core transfer logic for Ledgerbank.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Domain records, transfer validation, lock ordering, and error classification live here.
//!
//! # Modules
//!
//! - `ledger` - Accounts, journal entries, transfers, and the lock-order plan

pub mod ledger;
