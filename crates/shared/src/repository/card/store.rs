use super::{BLOCK_REQUEST_COLUMNS, CARD_COLUMNS};
use crate::{
    abstract_trait::card::repository::{CardStoreTrait, CardTransactionTrait},
    config::ConnectionPool,
    errors::RepositoryError,
    model::{
        block_request::{BlockRequestModel, BlockRequestStatus},
        card::CardModel,
    },
};
use async_trait::async_trait;
use sqlx::{Postgres, Transaction};
use tracing::error;
use uuid::Uuid;

/// Opens PostgreSQL transactions whose reads take row locks (`FOR UPDATE`).
pub struct PgCardStore {
    db: ConnectionPool,
}

impl PgCardStore {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CardStoreTrait for PgCardStore {
    async fn begin(&self) -> Result<Box<dyn CardTransactionTrait>, RepositoryError> {
        let tx = self.db.begin().await.map_err(|e| {
            error!("❌ Failed to begin transaction: {e:?}");
            RepositoryError::from(e)
        })?;

        Ok(Box::new(PgCardTransaction { tx }))
    }
}

/// Rolled back by sqlx when dropped before `commit`.
pub struct PgCardTransaction {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl CardTransactionTrait for PgCardTransaction {
    async fn find_by_id_for_update(
        &mut self,
        id: Uuid,
    ) -> Result<Option<CardModel>, RepositoryError> {
        sqlx::query_as::<_, CardModel>(&format!(
            "SELECT {CARD_COLUMNS} FROM cards WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(RepositoryError::from)
    }

    async fn find_by_id_for_owner_for_update(
        &mut self,
        id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<CardModel>, RepositoryError> {
        sqlx::query_as::<_, CardModel>(&format!(
            "SELECT {CARD_COLUMNS} FROM cards WHERE id = $1 AND user_id = $2 FOR UPDATE"
        ))
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(RepositoryError::from)
    }

    async fn save(&mut self, card: &CardModel) -> Result<CardModel, RepositoryError> {
        sqlx::query_as::<_, CardModel>(&format!(
            r#"
            INSERT INTO cards (id, user_id, card_number, expiration_date, status, balance, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, NOW(), NOW())
            ON CONFLICT (id) DO UPDATE SET
                status = EXCLUDED.status,
                balance = EXCLUDED.balance,
                updated_at = NOW()
            RETURNING {CARD_COLUMNS}
            "#
        ))
        .bind(card.id)
        .bind(card.user_id)
        .bind(&card.card_number)
        .bind(card.expiration_date)
        .bind(card.status)
        .bind(card.balance)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| {
            error!("❌ Failed to save card {}: {e:?}", card.id);
            RepositoryError::from(e)
        })
    }

    async fn exists_block_request(
        &mut self,
        card_id: Uuid,
        status: BlockRequestStatus,
    ) -> Result<bool, RepositoryError> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM card_block_requests WHERE card_id = $1 AND status = $2)",
        )
        .bind(card_id)
        .bind(status)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(RepositoryError::from)
    }

    async fn insert_block_request(
        &mut self,
        request: &BlockRequestModel,
    ) -> Result<BlockRequestModel, RepositoryError> {
        sqlx::query_as::<_, BlockRequestModel>(&format!(
            r#"
            INSERT INTO card_block_requests (id, card_id, user_id, requested_at, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {BLOCK_REQUEST_COLUMNS}
            "#
        ))
        .bind(request.id)
        .bind(request.card_id)
        .bind(request.user_id)
        .bind(request.requested_at)
        .bind(request.status)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|e| {
            error!(
                "❌ Failed to insert block request for card {}: {e:?}",
                request.card_id
            );
            RepositoryError::from(e)
        })
    }

    async fn find_block_request(
        &mut self,
        id: Uuid,
    ) -> Result<Option<BlockRequestModel>, RepositoryError> {
        sqlx::query_as::<_, BlockRequestModel>(&format!(
            "SELECT {BLOCK_REQUEST_COLUMNS} FROM card_block_requests WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(RepositoryError::from)
    }

    async fn find_block_request_for_update(
        &mut self,
        id: Uuid,
    ) -> Result<Option<BlockRequestModel>, RepositoryError> {
        sqlx::query_as::<_, BlockRequestModel>(&format!(
            "SELECT {BLOCK_REQUEST_COLUMNS} FROM card_block_requests WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(RepositoryError::from)
    }

    async fn update_block_request_status(
        &mut self,
        id: Uuid,
        status: BlockRequestStatus,
    ) -> Result<BlockRequestModel, RepositoryError> {
        sqlx::query_as::<_, BlockRequestModel>(&format!(
            "UPDATE card_block_requests SET status = $2 WHERE id = $1 RETURNING {BLOCK_REQUEST_COLUMNS}"
        ))
        .bind(id)
        .bind(status)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(RepositoryError::from)
    }

    async fn commit(self: Box<Self>) -> Result<(), RepositoryError> {
        self.tx.commit().await.map_err(|e| {
            error!("❌ Failed to commit transaction: {e:?}");
            RepositoryError::from(e)
        })
    }
}
