use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "card_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum CardStatus {
    Active,
    Blocked,
}

impl fmt::Display for CardStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardStatus::Active => write!(f, "ACTIVE"),
            CardStatus::Blocked => write!(f, "BLOCKED"),
        }
    }
}

/// Fractional digits kept by the `cards.balance` column.
pub const BALANCE_SCALE: u32 = 2;

/// Largest value `NUMERIC(19, 2)` can hold: 99 999 999 999 999 999.99.
pub const MAX_BALANCE: Decimal =
    Decimal::from_parts(0x89E7_FFFF, 0x8AC7_2304, 0, false, BALANCE_SCALE);

/// Whether `amount` is stored by the balance column exactly, without rounding
/// or overflow.
pub fn fits_balance_column(amount: Decimal) -> bool {
    amount.normalize().scale() <= BALANCE_SCALE && amount.abs() <= MAX_BALANCE
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct CardModel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub card_number: String,
    pub expiration_date: NaiveDate,
    pub status: CardStatus,
    pub balance: Decimal,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

impl CardModel {
    pub fn is_active(&self) -> bool {
        self.status == CardStatus::Active
    }
}
