use crate::{
    domain::{requests::TransferRequest, responses::ApiResponse},
    errors::ServiceError,
};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub type DynTransferService = Arc<dyn TransferServiceTrait + Send + Sync>;

#[async_trait]
pub trait TransferServiceTrait {
    async fn transfer(
        &self,
        caller_id: Uuid,
        req: &TransferRequest,
    ) -> Result<ApiResponse<()>, ServiceError>;
}
