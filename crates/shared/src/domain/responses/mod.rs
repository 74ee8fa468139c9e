mod api;
mod auth;
mod block_request;
mod card;
mod pagination;
mod user;

pub use self::api::{ApiResponse, ApiResponsePagination};
pub use self::auth::TokenResponse;
pub use self::block_request::BlockRequestResponse;
pub use self::card::{CardBalanceResponse, CardResponse};
pub use self::pagination::Pagination;
pub use self::user::UserResponse;
