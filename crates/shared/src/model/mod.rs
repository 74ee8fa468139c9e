pub mod block_request;
pub mod card;
pub mod user;
