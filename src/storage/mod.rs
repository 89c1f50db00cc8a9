pub mod json_backend;

use crate::{core::errors::FinanceError, domain::FinanceData};

pub type Result<T> = std::result::Result<T, FinanceError>;

/// Where a session's finance document comes from.
pub trait DataSource: Send + Sync {
    /// Reads and parses the whole document.
    fn read(&self) -> Result<FinanceData>;

    /// Human-readable origin for logs and prompts.
    fn describe(&self) -> String;
}

pub use json_backend::{load_data_from_path, save_data_to_path, JsonFileSource, MemorySource};
