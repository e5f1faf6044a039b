//! Transfer record store: append-only transfer metadata.

use chrono::Utc;
use ledgerbank_core::ledger::Transfer;
use ledgerbank_shared::types::{AccountId, PageRequest, PageResponse, TransferId};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use super::error::StoreError;
use crate::entities::transfers;

/// Transfer record repository.
#[derive(Debug, Clone)]
pub struct TransferRecordRepository {
    db: DatabaseConnection,
}

impl TransferRecordRepository {
    /// Creates a new transfer record repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Appends a transfer record.
    pub async fn append<C>(
        conn: &C,
        from_account_id: AccountId,
        to_account_id: AccountId,
        amount: i64,
    ) -> Result<Transfer, StoreError>
    where
        C: ConnectionTrait,
    {
        let transfer = transfers::ActiveModel {
            from_account_id: Set(from_account_id.into_inner()),
            to_account_id: Set(to_account_id.into_inner()),
            amount: Set(amount),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        }
        .insert(conn)
        .await?;

        Ok(transfer.into())
    }

    /// Gets a transfer by ID.
    pub async fn get_transfer(&self, id: TransferId) -> Result<Transfer, StoreError> {
        transfers::Entity::find_by_id(id.into_inner())
            .one(&self.db)
            .await?
            .map(Transfer::from)
            .ok_or(StoreError::TransferNotFound(id))
    }

    /// Lists transfers where the account is either source or destination.
    pub async fn list_transfers(
        &self,
        account_id: AccountId,
        page: PageRequest,
    ) -> Result<PageResponse<Transfer>, StoreError> {
        let raw_id = account_id.into_inner();
        let query = transfers::Entity::find().filter(
            Condition::any()
                .add(transfers::Column::FromAccountId.eq(raw_id))
                .add(transfers::Column::ToAccountId.eq(raw_id)),
        );

        let total = query.clone().count(&self.db).await?;
        let transfers = query
            .order_by_asc(transfers::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok(PageResponse::new(
            transfers.into_iter().map(Transfer::from).collect(),
            page,
            total,
        ))
    }
}
