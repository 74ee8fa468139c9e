use super::CARD_COLUMNS;
use crate::{
    abstract_trait::card::repository::CardCommandRepositoryTrait,
    config::ConnectionPool,
    errors::RepositoryError,
    model::card::CardModel,
    repository::acquire,
};
use async_trait::async_trait;
use tracing::error;
use uuid::Uuid;

pub struct CardCommandRepository {
    db: ConnectionPool,
}

impl CardCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CardCommandRepositoryTrait for CardCommandRepository {
    async fn create(&self, card: &CardModel) -> Result<CardModel, RepositoryError> {
        let mut conn = acquire(&self.db).await?;

        sqlx::query_as::<_, CardModel>(&format!(
            r#"
            INSERT INTO cards (id, user_id, card_number, expiration_date, status, balance, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, NOW(), NOW())
            RETURNING {CARD_COLUMNS}
            "#
        ))
        .bind(card.id)
        .bind(card.user_id)
        .bind(&card.card_number)
        .bind(card.expiration_date)
        .bind(card.status)
        .bind(card.balance)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to create card for user {}: {e:?}", card.user_id);
            RepositoryError::from(e)
        })
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let mut conn = acquire(&self.db).await?;

        let result = sqlx::query("DELETE FROM cards WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to delete card {id}: {e:?}");
                RepositoryError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
