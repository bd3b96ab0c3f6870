//! Store abstraction traits
//!
//! This module provides the `DocumentStore` trait that abstracts over the
//! backing store, and the `StoreProvider` enum that selects a backend
//! (in-memory, file-based SQLite, remote Turso replica).
//!
//! # Example
//!
//! ```rust,ignore
//! use orderdesk::db::{DocumentStore, StoreProvider};
//!
//! // Use in-memory store (default for development/testing)
//! let store = StoreProvider::Memory.create_store().await?;
//!
//! // Use file-based SQLite
//! let store = StoreProvider::Local { path: "data.db".into() }.create_store().await?;
//! ```

use crate::types::{Client, Order, OrderItem, OrderStatus, Product, Result, User};
use async_trait::async_trait;
use std::sync::Arc;

/// Store provider configuration
#[derive(Debug, Clone, Default)]
pub enum StoreProvider {
    /// In-memory store (ephemeral, lost on restart)
    #[default]
    Memory,
    /// File-based SQLite store
    Local {
        /// Path to the SQLite database file
        path: String,
    },
    /// Remote Turso replica (requires network access)
    #[cfg(feature = "turso")]
    Remote {
        /// The Turso database URL (e.g., `libsql://your-db.turso.io`)
        url: String,
        /// Authentication token for the Turso database
        auth_token: String,
    },
}

impl StoreProvider {
    /// Create a store from this provider configuration
    pub async fn create_store(&self) -> Result<Arc<dyn DocumentStore>> {
        match self {
            StoreProvider::Memory => {
                let store = super::libsql::LibsqlStore::new_memory().await?;
                Ok(Arc::new(store))
            }
            StoreProvider::Local { path } => {
                let store = super::libsql::LibsqlStore::new_local(path).await?;
                Ok(Arc::new(store))
            }
            #[cfg(feature = "turso")]
            StoreProvider::Remote { url, auth_token } => {
                let store =
                    super::libsql::LibsqlStore::new_remote(url.clone(), auth_token.clone()).await?;
                Ok(Arc::new(store))
            }
        }
    }

    /// Select a provider from the database section of the configuration.
    ///
    /// Precedence: remote replica (when configured and the `turso` feature
    /// is enabled), then a local file path, then in-memory.
    pub fn from_config(database: &crate::config::DatabaseConfig) -> Self {
        #[cfg(feature = "turso")]
        {
            if let (Some(url), Some(token)) = (&database.url, &database.auth_token) {
                if !url.is_empty() && !token.is_empty() {
                    return StoreProvider::Remote {
                        url: url.clone(),
                        auth_token: token.clone(),
                    };
                }
            }
        }

        if let Some(path) = &database.path {
            if !path.is_empty() && path != ":memory:" {
                return StoreProvider::Local { path: path.clone() };
            }
        }

        StoreProvider::Memory
    }
}

/// Abstract trait for store operations
///
/// This trait defines all store operations needed by the application.
/// Keeping it explicit makes the store swappable and mockable in tests.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    // ============== User Operations ==============

    /// Create a new credential record
    async fn create_user(&self, user: &User) -> Result<()>;

    /// Get a user by email
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;

    // ============== Client Operations ==============

    /// Create a new client
    async fn create_client(&self, client: &Client) -> Result<()>;

    /// Get a client by id
    async fn get_client(&self, id: &str) -> Result<Option<Client>>;

    /// Paginated, filtered client listing.
    ///
    /// Filters are case-insensitive substring matches. Returns the page of
    /// clients plus the total count matching the filters.
    async fn list_clients(
        &self,
        page: u32,
        limit: u32,
        name: Option<&str>,
        email: Option<&str>,
    ) -> Result<(Vec<Client>, u64)>;

    /// Apply the provided fields to a client; `None` leaves the current
    /// value in place. Returns the updated client, or `None` if absent.
    async fn update_client(
        &self,
        id: &str,
        name: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<Client>>;

    /// Delete a client by id; returns whether a record was removed
    async fn delete_client(&self, id: &str) -> Result<bool>;

    // ============== Product Operations ==============

    /// Seed a product (no HTTP surface creates products)
    async fn create_product(&self, product: &Product) -> Result<()>;

    /// Get a product by id
    async fn get_product(&self, id: &str) -> Result<Option<Product>>;

    // ============== Order Operations ==============

    /// Persist a priced order
    async fn create_order(&self, order: &Order) -> Result<()>;

    /// Get an order by id
    async fn get_order(&self, id: &str) -> Result<Option<Order>>;

    /// Paginated order listing, optionally filtered by status and/or
    /// owning client. Returns the page plus the total matching count.
    async fn list_orders(
        &self,
        page: u32,
        limit: u32,
        status: Option<OrderStatus>,
        client_id: Option<&str>,
    ) -> Result<(Vec<Order>, u64)>;

    /// Replace an order's items and derived total price. Returns the
    /// updated order, or `None` if absent.
    async fn update_order_items(
        &self,
        id: &str,
        items: &[OrderItem],
        total_price: f64,
    ) -> Result<Option<Order>>;

    /// Overwrite an order's status (no transition-graph enforcement).
    /// Returns the updated order, or `None` if absent.
    async fn set_order_status(&self, id: &str, status: OrderStatus) -> Result<Option<Order>>;

    /// Delete an order by id; returns whether a record was removed
    async fn delete_order(&self, id: &str) -> Result<bool>;
}
