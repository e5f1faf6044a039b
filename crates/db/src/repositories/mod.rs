//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.
//! Write primitives are associated functions that take the connection or open
//! database transaction explicitly.

pub mod account;
pub mod entry;
pub mod error;
pub mod transfer_record;

pub use account::{AccountRepository, CreateAccountInput};
pub use entry::EntryRepository;
pub use error::{StoreError, classify_db_err};
pub use transfer_record::TransferRecordRepository;
