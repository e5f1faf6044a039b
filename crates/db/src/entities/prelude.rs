//! Entity re-exports.

pub use super::accounts::Entity as Accounts;
pub use super::entries::Entity as Entries;
pub use super::transfers::Entity as Transfers;
