use crate::model::card::{BALANCE_SCALE, CardStatus, MAX_BALANCE};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

pub const DEFAULT_PAGE_SIZE: i64 = 5;
pub const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCardRequest {
    pub user_id: Uuid,

    /// Opening balance, zero when omitted.
    #[validate(custom(function = "validate_initial_balance"))]
    #[schema(value_type = Option<String>, example = "100.00")]
    pub initial_balance: Option<Decimal>,
}

/// Card listing filter. Every bound is optional and inclusive.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FindAllCards {
    pub id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub status: Option<CardStatus>,
    pub expiration_date_from: Option<NaiveDate>,
    pub expiration_date_to: Option<NaiveDate>,
    #[param(value_type = Option<String>)]
    pub balance_from: Option<Decimal>,
    #[param(value_type = Option<String>)]
    pub balance_to: Option<Decimal>,

    #[serde(default)]
    #[validate(range(min = 0, message = "page_number must not be negative"))]
    pub page_number: i64,

    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100, message = "page_size must be between 1 and 100"))]
    pub page_size: i64,
}

impl FindAllCards {
    pub fn new() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            ..Default::default()
        }
    }

    pub fn offset(&self) -> i64 {
        self.page_number * self.page_size
    }

    pub fn matches(&self, card: &crate::model::card::CardModel) -> bool {
        self.id.is_none_or(|id| card.id == id)
            && self.user_id.is_none_or(|user_id| card.user_id == user_id)
            && self.status.is_none_or(|status| card.status == status)
            && self
                .expiration_date_from
                .is_none_or(|from| card.expiration_date >= from)
            && self
                .expiration_date_to
                .is_none_or(|to| card.expiration_date <= to)
            && self.balance_from.is_none_or(|from| card.balance >= from)
            && self.balance_to.is_none_or(|to| card.balance <= to)
    }
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

fn validate_initial_balance(value: &Decimal) -> Result<(), ValidationError> {
    let message = if value.is_sign_negative() && !value.is_zero() {
        "initial_balance must not be negative"
    } else if value.normalize().scale() > BALANCE_SCALE {
        "initial_balance must have at most 2 decimal places"
    } else if *value > MAX_BALANCE {
        "initial_balance exceeds the maximum card balance"
    } else {
        return Ok(());
    };

    let mut err = ValidationError::new("range");
    err.message = Some(message.into());
    Err(err)
}
