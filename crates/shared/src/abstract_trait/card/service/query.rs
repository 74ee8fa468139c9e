use crate::{
    domain::{
        requests::FindAllCards,
        responses::{ApiResponse, ApiResponsePagination, CardBalanceResponse, CardResponse},
    },
    errors::ServiceError,
};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub type DynCardQueryService = Arc<dyn CardQueryServiceTrait + Send + Sync>;

#[async_trait]
pub trait CardQueryServiceTrait {
    async fn find_by_id(&self, id: Uuid) -> Result<ApiResponse<CardResponse>, ServiceError>;
    async fn find_all(
        &self,
        filter: &FindAllCards,
    ) -> Result<ApiResponsePagination<Vec<CardResponse>>, ServiceError>;
    /// Same as `find_all` with the owner forced to `caller_id`.
    async fn find_my_cards(
        &self,
        caller_id: Uuid,
        filter: &FindAllCards,
    ) -> Result<ApiResponsePagination<Vec<CardResponse>>, ServiceError>;
    async fn my_balance(
        &self,
        card_id: Uuid,
        caller_id: Uuid,
    ) -> Result<ApiResponse<CardBalanceResponse>, ServiceError>;
}
