//! Debt data structures and loading

mod data;
pub mod loader;

pub use data::{Debt, DebtId, DebtType, validate_debts};
pub use loader::{load_debts, load_debts_from_reader, DEFAULT_DEBTS_PATH};
