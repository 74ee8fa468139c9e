mod command;
mod query;
mod store;

pub use self::command::{CardCommandRepositoryTrait, DynCardCommandRepository};
pub use self::query::{CardQueryRepositoryTrait, DynCardQueryRepository};
pub use self::store::{CardStoreTrait, CardTransactionTrait, DynCardStore};
