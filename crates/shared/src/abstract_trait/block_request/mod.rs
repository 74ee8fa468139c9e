use crate::{
    domain::responses::{ApiResponse, BlockRequestResponse},
    errors::{RepositoryError, ServiceError},
    model::block_request::BlockRequestModel,
};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub type DynBlockRequestQueryRepository = Arc<dyn BlockRequestQueryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait BlockRequestQueryRepositoryTrait {
    async fn find_active(&self) -> Result<Vec<BlockRequestModel>, RepositoryError>;
}

pub type DynBlockRequestService = Arc<dyn BlockRequestServiceTrait + Send + Sync>;

#[async_trait]
pub trait BlockRequestServiceTrait {
    async fn request_block(
        &self,
        card_id: Uuid,
        caller_id: Uuid,
    ) -> Result<ApiResponse<BlockRequestResponse>, ServiceError>;

    async fn complete(
        &self,
        request_id: Uuid,
    ) -> Result<ApiResponse<BlockRequestResponse>, ServiceError>;

    async fn find_active(&self) -> Result<ApiResponse<Vec<BlockRequestResponse>>, ServiceError>;
}
