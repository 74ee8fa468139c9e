mod command;
mod query;
mod store;

pub use self::command::CardCommandRepository;
pub use self::query::CardQueryRepository;
pub use self::store::{PgCardStore, PgCardTransaction};

pub(crate) const CARD_COLUMNS: &str =
    "id, user_id, card_number, expiration_date, status, balance, created_at, updated_at";

pub(crate) const BLOCK_REQUEST_COLUMNS: &str = "id, card_id, user_id, requested_at, status";
