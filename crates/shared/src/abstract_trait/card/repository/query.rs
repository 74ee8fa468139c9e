use crate::{domain::requests::FindAllCards, errors::RepositoryError, model::card::CardModel};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub type DynCardQueryRepository = Arc<dyn CardQueryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait CardQueryRepositoryTrait {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<CardModel>, RepositoryError>;
    async fn find_by_id_for_owner(
        &self,
        id: Uuid,
        owner_id: Uuid,
    ) -> Result<Option<CardModel>, RepositoryError>;
    /// Returns one page of matching cards plus the total number of matches.
    async fn find_all(&self, filter: &FindAllCards)
    -> Result<(Vec<CardModel>, i64), RepositoryError>;
}
