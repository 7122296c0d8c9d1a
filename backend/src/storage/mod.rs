//! # Storage Module
//!
//! Handles all data persistence for the spendwise backend.
//!
//! The domain layer never issues raw queries; it consumes already-materialized
//! record lists from the repositories in this module. SQLite (via SQLx) is the
//! single storage backend.
//!
//! ## Key Responsibilities
//!
//! - **Connection Management**: Pool lifecycle and schema setup
//! - **Migration Support**: Column additions for databases created by older builds
//! - **Data Access**: One repository per entity (transactions, budgets, users)

pub mod connection;
pub mod repositories;

pub use connection::DbConnection;
pub use repositories::{BudgetRepository, TransactionRepository, UserRepository};
