//! Document store access.
//!
//! This module provides the store abstraction for clients, products,
//! orders, and credential records:
//! - [`traits`] - the [`DocumentStore`] trait and [`StoreProvider`] selection
//! - [`libsql`](self::libsql) - the libsql-backed implementation
//!
//! # Store Backends
//!
//! The following backends are supported:
//! - in-memory (default for development and tests)
//! - local SQLite file
//! - remote Turso replica (requires the `turso` feature)
//!
//! All referential checks (order → client, order item → product) happen at
//! the application layer; the store itself enforces no cross-document
//! constraints.

#![allow(missing_docs)]

pub mod libsql;
pub mod traits;

// Re-exports
pub use self::libsql::LibsqlStore;
pub use traits::{DocumentStore, StoreProvider};
