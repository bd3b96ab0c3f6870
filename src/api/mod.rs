//! HTTP API Handlers and Routes
//!
//! This module provides the REST API layer for Orderdesk, built on the Axum
//! web framework.
//!
//! # Module Structure
//!
//! - [`api::handlers`](crate::api::handlers) - Request handlers for each endpoint
//! - [`api::routes`](crate::api::routes) - Route definitions and router configuration
//! - [`api::docs`](crate::api::docs) - Generated OpenAPI description
//!
//! # API Endpoints
//!
//! ## Authentication (`/auth`)
//! - `POST /auth/register` - Register new user
//! - `POST /auth/login` - Login and receive JWT token
//!
//! ## Clients (`/clients`)
//! - `GET /clients` - Paginated list with name/email filters
//! - `POST /clients` - Create a client
//! - `GET /clients/{id}` / `PUT` / `DELETE` - Client by id
//!
//! ## Orders (`/orders`)
//! - `GET /orders` - Paginated list with status filter
//! - `POST /orders` - Create an order (server-side pricing)
//! - `GET /orders/{id}` / `PUT` / `DELETE` - Order by id
//! - `PATCH /orders/{id}/cancel` - Set status to canceled
//!
//! ## Client-scoped orders (`/clients/{clientId}/orders`)
//! Same shape as `/orders`, filtered to the owning client. These routes
//! require a bearer token; the top-level trees do not, mirroring the
//! system this API reproduces.
//!
//! # Authentication
//!
//! Protected endpoints require a valid JWT token in the `Authorization`
//! header:
//! ```text
//! Authorization: Bearer <token>
//! ```
//!
//! # OpenAPI Documentation
//!
//! The OpenAPI document is served at `/api-docs`. When the `swagger-ui`
//! feature is enabled, interactive documentation is mounted as well.

/// Generated OpenAPI description and its handler.
pub mod docs;
/// Request and response handlers for all API endpoints.
pub mod handlers;
/// Router configuration and route definitions.
pub mod routes;
