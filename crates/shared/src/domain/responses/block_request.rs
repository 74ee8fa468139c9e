use crate::model::block_request::{BlockRequestModel, BlockRequestStatus};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BlockRequestResponse {
    pub id: Uuid,
    pub card_id: Uuid,
    pub user_id: Uuid,
    pub requested_at: NaiveDateTime,
    pub status: BlockRequestStatus,
}

impl From<BlockRequestModel> for BlockRequestResponse {
    fn from(value: BlockRequestModel) -> Self {
        Self {
            id: value.id,
            card_id: value.card_id,
            user_id: value.user_id,
            requested_at: value.requested_at,
            status: value.status,
        }
    }
}
