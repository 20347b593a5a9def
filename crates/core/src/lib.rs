//! Caixa Core - domain entities, services, and traits.
//!
//! This crate contains the bookkeeping business logic: accounts, the
//! two-level category hierarchy, transactions, transfers between accounts
//! (with currency conversion) and OFX statement import. It is
//! database-agnostic and defines repository traits that are implemented
//! by the `storage-sqlite` crate.

pub mod accounts;
pub mod categories;
pub mod errors;
pub mod fx;
pub mod ofx;
pub mod transactions;
pub mod transfers;
pub mod users;

#[cfg(test)]
pub(crate) mod testing;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
