mod command;
mod lifecycle;
mod query;
mod transfer;

pub use self::command::{CardCommandService, CardCommandServiceDeps};
pub use self::lifecycle::CardLifecycleService;
pub use self::query::CardQueryService;
pub use self::transfer::TransferService;
