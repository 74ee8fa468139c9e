use crate::{
    abstract_trait::block_request::BlockRequestQueryRepositoryTrait,
    config::ConnectionPool,
    errors::RepositoryError,
    model::block_request::BlockRequestModel,
    repository::{acquire, card::BLOCK_REQUEST_COLUMNS},
};
use async_trait::async_trait;
use tracing::error;

pub struct BlockRequestQueryRepository {
    db: ConnectionPool,
}

impl BlockRequestQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BlockRequestQueryRepositoryTrait for BlockRequestQueryRepository {
    async fn find_active(&self) -> Result<Vec<BlockRequestModel>, RepositoryError> {
        let mut conn = acquire(&self.db).await?;

        sqlx::query_as::<_, BlockRequestModel>(&format!(
            "SELECT {BLOCK_REQUEST_COLUMNS} FROM card_block_requests WHERE status = 'ACTIVE' ORDER BY requested_at"
        ))
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch active block requests: {e:?}");
            RepositoryError::from(e)
        })
    }
}
