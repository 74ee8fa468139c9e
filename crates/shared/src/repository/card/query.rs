use super::CARD_COLUMNS;
use crate::{
    abstract_trait::card::repository::CardQueryRepositoryTrait,
    config::ConnectionPool,
    domain::requests::FindAllCards,
    errors::RepositoryError,
    model::card::CardModel,
    repository::acquire,
};
use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};
use tracing::error;
use uuid::Uuid;

pub struct CardQueryRepository {
    db: ConnectionPool,
}

impl CardQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filter: &FindAllCards) {
    builder.push(" WHERE TRUE");

    if let Some(id) = filter.id {
        builder.push(" AND id = ").push_bind(id);
    }
    if let Some(user_id) = filter.user_id {
        builder.push(" AND user_id = ").push_bind(user_id);
    }
    if let Some(status) = filter.status {
        builder.push(" AND status = ").push_bind(status);
    }
    if let Some(from) = filter.expiration_date_from {
        builder.push(" AND expiration_date >= ").push_bind(from);
    }
    if let Some(to) = filter.expiration_date_to {
        builder.push(" AND expiration_date <= ").push_bind(to);
    }
    if let Some(from) = filter.balance_from {
        builder.push(" AND balance >= ").push_bind(from);
    }
    if let Some(to) = filter.balance_to {
        builder.push(" AND balance <= ").push_bind(to);
    }
}

#[async_trait]
impl CardQueryRepositoryTrait for CardQueryRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<CardModel>, RepositoryError> {
        let mut conn = acquire(&self.db).await?;

        sqlx::query_as::<_, CardModel>(&format!("SELECT {CARD_COLUMNS} FROM cards WHERE id = $1"))
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch card {id}: {e:?}");
                RepositoryError::from(e)
            })
    }

    async fn find_by_id_for_owner(
        &self,
        id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<CardModel>, RepositoryError> {
        let mut conn = acquire(&self.db).await?;

        sqlx::query_as::<_, CardModel>(&format!(
            "SELECT {CARD_COLUMNS} FROM cards WHERE id = $1 AND user_id = $2"
        ))
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch card {id} for owner {owner_id}: {e:?}");
            RepositoryError::from(e)
        })
    }

    async fn find_all(
        &self,
        filter: &FindAllCards,
    ) -> Result<(Vec<CardModel>, i64), RepositoryError> {
        let mut conn = acquire(&self.db).await?;

        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM cards");
        push_filters(&mut count, filter);

        let total = count
            .build_query_scalar::<i64>()
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to count cards: {e:?}");
                RepositoryError::from(e)
            })?;

        let mut page = QueryBuilder::<Postgres>::new(format!("SELECT {CARD_COLUMNS} FROM cards"));
        push_filters(&mut page, filter);
        page.push(" ORDER BY created_at, id LIMIT ")
            .push_bind(filter.page_size)
            .push(" OFFSET ")
            .push_bind(filter.offset());

        let cards = page
            .build_query_as::<CardModel>()
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch cards page: {e:?}");
                RepositoryError::from(e)
            })?;

        Ok((cards, total))
    }
}
