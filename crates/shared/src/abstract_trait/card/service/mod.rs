mod command;
mod lifecycle;
mod query;
mod transfer;

pub use self::command::{CardCommandServiceTrait, DynCardCommandService};
pub use self::lifecycle::{CardLifecycleServiceTrait, DynCardLifecycleService};
pub use self::query::{CardQueryServiceTrait, DynCardQueryService};
pub use self::transfer::{DynTransferService, TransferServiceTrait};
