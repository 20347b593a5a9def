//! SQLite storage implementation for transactions.

mod model;
mod repository;

pub use model::{TransactionChangesDB, TransactionDB};
pub use repository::TransactionRepository;
