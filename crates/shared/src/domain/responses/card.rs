use crate::{
    model::card::{CardModel, CardStatus},
    utils::mask_card_number,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Card as shown to clients; the number is always masked.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CardResponse {
    pub id: Uuid,
    #[schema(example = "**** **** **** 1234")]
    pub number: String,
    pub user_id: Uuid,
    pub expiration_date: NaiveDate,
    pub status: CardStatus,
    #[schema(value_type = String, example = "100.00")]
    pub balance: Decimal,
}

impl From<CardModel> for CardResponse {
    fn from(value: CardModel) -> Self {
        Self {
            id: value.id,
            number: mask_card_number(&value.card_number),
            user_id: value.user_id,
            expiration_date: value.expiration_date,
            status: value.status,
            balance: value.balance,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CardBalanceResponse {
    pub card_id: Uuid,
    #[schema(value_type = String, example = "100.00")]
    pub balance: Decimal,
}
