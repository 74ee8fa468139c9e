pub mod block_request;
pub mod card;
pub mod memory;
pub mod user;

use crate::{config::ConnectionPool, errors::RepositoryError};
use sqlx::{Postgres, pool::PoolConnection};
use tracing::error;

pub(crate) async fn acquire(db: &ConnectionPool) -> Result<PoolConnection<Postgres>, RepositoryError> {
    db.acquire().await.map_err(|e| {
        error!("❌ Failed to acquire DB connection: {e:?}");
        RepositoryError::from(e)
    })
}
