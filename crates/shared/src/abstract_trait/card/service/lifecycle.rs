use crate::{
    domain::responses::{ApiResponse, CardResponse},
    errors::ServiceError,
    model::card::CardStatus,
};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub type DynCardLifecycleService = Arc<dyn CardLifecycleServiceTrait + Send + Sync>;

#[async_trait]
pub trait CardLifecycleServiceTrait {
    /// Fails with `StatusAlreadySet` when the card already has `target`.
    async fn set_status(
        &self,
        card_id: Uuid,
        target: CardStatus,
    ) -> Result<ApiResponse<CardResponse>, ServiceError>;

    async fn block(&self, card_id: Uuid) -> Result<ApiResponse<CardResponse>, ServiceError>;

    async fn activate(&self, card_id: Uuid) -> Result<ApiResponse<CardResponse>, ServiceError>;
}
