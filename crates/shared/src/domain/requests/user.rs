use crate::model::user::UserRole;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use utoipa::ToSchema;
use validator::Validate;

static PHONE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^89\d{9}$").expect("phone number pattern is valid"));

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,

    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,

    #[validate(email(message = "Email must be a valid email address"))]
    pub email: String,

    #[validate(regex(path = *PHONE_NUMBER, message = "Phone number must match 89*********"))]
    #[schema(example = "89161234567")]
    pub phone_number: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    pub role: Option<UserRole>,
}

/// Partial update: absent fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, message = "First name must not be empty"))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, message = "Last name must not be empty"))]
    pub last_name: Option<String>,

    #[validate(email(message = "Email must be a valid email address"))]
    pub email: Option<String>,

    #[validate(regex(path = *PHONE_NUMBER, message = "Phone number must match 89*********"))]
    pub phone_number: Option<String>,

    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: Option<String>,

    pub role: Option<UserRole>,
}
