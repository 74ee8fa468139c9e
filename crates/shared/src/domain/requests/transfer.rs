use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// The amount must be positive with at most two decimal places. The transfer
/// service checks this and reports `InvalidAmount` rather than a generic
/// validation failure.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct TransferRequest {
    pub from_card_id: Uuid,
    pub to_card_id: Uuid,
    #[schema(value_type = String, example = "30.00")]
    pub amount: Decimal,
}
