mod command;
mod query;

pub use self::command::UserCommandRepository;
pub use self::query::UserQueryRepository;

pub(crate) const USER_COLUMNS: &str =
    "id, first_name, last_name, email, phone_number, password, role, created_at, updated_at";
