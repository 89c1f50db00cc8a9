pub mod cancel;
pub mod errors;
pub mod services;
pub mod store;
pub mod time;
pub mod utils;

pub use cancel::CancelToken;
pub use errors::{CliError, FinanceError};
pub use store::{load_snapshot, spawn_load, FinanceStore, LoadMetadata, LoadedSnapshot};
pub use time::{Clock, FixedClock, SystemClock};
