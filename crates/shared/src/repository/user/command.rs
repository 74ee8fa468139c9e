use super::USER_COLUMNS;
use crate::{
    abstract_trait::user::UserCommandRepositoryTrait, config::ConnectionPool,
    errors::RepositoryError, model::user::UserModel, repository::acquire,
};
use async_trait::async_trait;
use tracing::error;
use uuid::Uuid;

pub struct UserCommandRepository {
    db: ConnectionPool,
}

impl UserCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserCommandRepositoryTrait for UserCommandRepository {
    async fn create(&self, user: &UserModel) -> Result<UserModel, RepositoryError> {
        let mut conn = acquire(&self.db).await?;

        sqlx::query_as::<_, UserModel>(&format!(
            r#"
            INSERT INTO users (id, first_name, last_name, email, phone_number, password, role, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, NOW(), NOW())
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.id)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.phone_number)
        .bind(&user.password)
        .bind(user.role)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to create user: {e:?}");
            RepositoryError::from(e)
        })
    }

    async fn update(&self, user: &UserModel) -> Result<UserModel, RepositoryError> {
        let mut conn = acquire(&self.db).await?;

        sqlx::query_as::<_, UserModel>(&format!(
            r#"
            UPDATE users SET
                first_name = $2,
                last_name = $3,
                email = $4,
                phone_number = $5,
                password = $6,
                role = $7,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.id)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.phone_number)
        .bind(&user.password)
        .bind(user.role)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| {
            error!("❌ Failed to update user {}: {e:?}", user.id);
            RepositoryError::from(e)
        })
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let mut conn = acquire(&self.db).await?;

        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                error!("❌ Failed to delete user {id}: {e:?}");
                RepositoryError::from(e)
            })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
