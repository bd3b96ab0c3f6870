//! # Orderdesk
//!
//! A client and order management HTTP API with JWT bearer-token
//! authentication, server-side order pricing, and auto-generated OpenAPI
//! documentation.
//!
//! ## Overview
//!
//! Orderdesk can be used in two ways:
//!
//! 1. **As a standalone server** - Run the `orderdesk-server` binary
//! 2. **As a library** - Import components into your own Rust project
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,ignore
//! use orderdesk::{AuthService, PricingService, StoreProvider};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = StoreProvider::Memory.create_store().await?;
//!     let pricing = PricingService::new(store.clone());
//!
//!     // Totals are recomputed from the product catalog on every write
//!     let total = pricing.price_items(&items).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `local-db` | Local SQLite store (default) |
//! | `turso` | Remote Turso replica |
//! | `swagger-ui` | Interactive Swagger UI (the raw document is always at `/api-docs`) |
//!
//! ## Modules
//!
//! - [`api`] - REST API handlers, routes, and OpenAPI docs
//! - [`auth`] - JWT authentication and middleware
//! - [`db`] - Document store abstraction (in-memory, SQLite, Turso)
//! - [`pricing`] - Order pricing against the product catalog
//! - [`config`] - Environment-driven configuration
//! - [`types`] - Common types and error handling
//!
//! ## Access Policy
//!
//! The client-scoped order routes (`/clients/{clientId}/orders*`) require a
//! bearer token; the top-level `/clients` and `/orders` trees do not. This
//! mirrors the system this API reproduces and is intentional.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

/// HTTP API handlers, routes, and OpenAPI documentation.
pub mod api;
/// JWT authentication and middleware.
pub mod auth;
/// Environment-driven configuration.
pub mod config;
/// Document store abstraction and backends.
pub mod db;
/// Order pricing.
pub mod pricing;
/// Core types (requests, responses, errors).
pub mod types;

// Re-export commonly used types
pub use auth::jwt::AuthService;
pub use config::Config;
pub use db::{DocumentStore, LibsqlStore, StoreProvider};
pub use pricing::PricingService;
pub use types::{AppError, Result};

use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Process configuration
    pub config: Arc<Config>,
    /// Document store handle; trait-object so the backend is swappable
    pub store: Arc<dyn DocumentStore>,
    /// Order pricing service
    pub pricing: Arc<PricingService>,
    /// Authentication service
    pub auth_service: Arc<AuthService>,
}
