use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "block_request_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum BlockRequestStatus {
    Active,
    Completed,
}

impl fmt::Display for BlockRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockRequestStatus::Active => write!(f, "ACTIVE"),
            BlockRequestStatus::Completed => write!(f, "COMPLETED"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct BlockRequestModel {
    pub id: Uuid,
    pub card_id: Uuid,
    pub user_id: Uuid,
    pub requested_at: NaiveDateTime,
    pub status: BlockRequestStatus,
}
