pub mod auth;
pub mod card;
pub mod transfer;
pub mod user;

pub use self::auth::LoginRequest;
pub use self::card::{CreateCardRequest, FindAllCards};
pub use self::transfer::TransferRequest;
pub use self::user::{CreateUserRequest, UpdateUserRequest};
