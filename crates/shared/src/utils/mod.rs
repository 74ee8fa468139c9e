mod logs;
mod mask;
mod metrics;
mod random_card_number;
mod retry;
mod shutdown;

pub use self::logs::Logger;
pub use self::mask::mask_card_number;
pub use self::metrics::{Method, MethodLabels, Metrics, Status};
pub use self::random_card_number::random_card_number;
pub use self::retry::retry_on_conflict;
pub use self::shutdown::shutdown_signal;
