use crate::{abstract_trait::hashing::HashingTrait, errors::ServiceError};
use async_trait::async_trait;
use bcrypt::{DEFAULT_COST, hash, verify};

#[derive(Debug, Clone)]
pub struct Hashing {
    cost: u32,
}

impl Hashing {
    pub fn new() -> Self {
        Self { cost: DEFAULT_COST }
    }

    /// Cheaper cost factor for tests.
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for Hashing {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HashingTrait for Hashing {
    async fn hash_password(&self, password: &str) -> Result<String, ServiceError> {
        let password = password.to_owned();
        let cost = self.cost;

        tokio::task::spawn_blocking(move || hash(password, cost))
            .await
            .map_err(|e| ServiceError::Internal(format!("hashing task failed: {e}")))?
            .map_err(ServiceError::from)
    }

    async fn compare_password(&self, hashed: &str, password: &str) -> Result<(), ServiceError> {
        let hashed = hashed.to_owned();
        let password = password.to_owned();

        let matches = tokio::task::spawn_blocking(move || verify(password, &hashed))
            .await
            .map_err(|e| ServiceError::Internal(format!("hashing task failed: {e}")))??;

        if matches {
            Ok(())
        } else {
            Err(ServiceError::InvalidCredentials)
        }
    }
}
