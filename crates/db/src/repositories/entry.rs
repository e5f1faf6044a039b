//! Entry journal: the append-only ledger of signed balance changes.

use chrono::Utc;
use ledgerbank_core::ledger::Entry;
use ledgerbank_shared::types::{AccountId, EntryId, PageRequest, PageResponse};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use super::error::StoreError;
use crate::entities::entries;

/// Entry journal repository.
///
/// There is no update or delete path; the schema rejects both.
#[derive(Debug, Clone)]
pub struct EntryRepository {
    db: DatabaseConnection,
}

impl EntryRepository {
    /// Creates a new entry repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Appends a signed entry for an account.
    pub async fn append<C>(conn: &C, account_id: AccountId, amount: i64) -> Result<Entry, StoreError>
    where
        C: ConnectionTrait,
    {
        let entry = entries::ActiveModel {
            account_id: Set(account_id.into_inner()),
            amount: Set(amount),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        }
        .insert(conn)
        .await?;

        Ok(entry.into())
    }

    /// Gets an entry by ID.
    pub async fn get_entry(&self, id: EntryId) -> Result<Entry, StoreError> {
        entries::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .map(Entry::from)
            .ok_or(StoreError::EntryNotFound(id))
    }

    /// Lists an account's entries in journal order.
    pub async fn list_entries(
        &self,
        account_id: AccountId,
        page: PageRequest,
    ) -> Result<PageResponse<Entry>, StoreError> {
        let query =
            entries::Entity::find().filter(entries::Column::AccountId.eq(account_id.into_inner()));

        let total = query.clone().count(&self.db).await?;
        let entries = query
            .order_by_asc(entries::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok(PageResponse::new(
            entries.into_iter().map(Entry::from).collect(),
            page,
            total,
        ))
    }
}
