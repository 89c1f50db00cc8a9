pub mod balance;
pub mod budget;
pub mod category;
pub mod common;
pub mod marker;
pub mod pot;
pub mod recurring;
pub mod snapshot;
pub mod transaction;

pub use balance::{Balance, Settings};
pub use budget::Budget;
pub use category::Category;
pub use common::{
    colors_match, duplicate_themes, find_named, names_match, Displayable, Identifiable,
    NamedEntity, Themed,
};
pub use marker::MarkerTheme;
pub use pot::Pot;
pub use recurring::{DueDate, RecurringBill};
pub use snapshot::FinanceData;
pub use transaction::Transaction;
