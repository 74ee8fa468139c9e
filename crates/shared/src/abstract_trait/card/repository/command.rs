use crate::{errors::RepositoryError, model::card::CardModel};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub type DynCardCommandRepository = Arc<dyn CardCommandRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait CardCommandRepositoryTrait {
    async fn create(&self, card: &CardModel) -> Result<CardModel, RepositoryError>;
    /// Removes the card together with its block requests.
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}
