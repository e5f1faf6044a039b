//! `SeaORM` entity definitions.
//!
//! Each entity converts into its `ledgerbank-core` domain record.

pub mod accounts;
pub mod entries;
pub mod prelude;
pub mod transfers;
