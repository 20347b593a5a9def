//! SQLite storage implementation for Caixa.
//!
//! This crate provides all database-related functionality using Diesel with
//! SQLite. It implements the repository traits defined in `caixa-core` and
//! contains:
//! - Database connection pooling and management
//! - Embedded migrations
//! - Repository implementations for all domain entities
//! - Database-specific model types (with Diesel derives)
//!
//! This crate is the only place in the application where Diesel dependencies
//! exist. Everything above it is database-agnostic and works with traits.
//!
//! All writes are funneled through a single-writer actor that runs each job
//! inside one immediate transaction; multi-statement sequences (the transfer
//! pair, the color cascade, the deletion cascades) are therefore atomic.

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod accounts;
pub mod categories;
pub mod transactions;
pub mod users;

// Re-export database utilities
pub use db::{create_pool, get_connection, run_migrations, spawn_writer, DbConnection, DbPool, WriteHandle};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from caixa-core for convenience
pub use caixa_core::errors::{DatabaseError, Error, Result};
