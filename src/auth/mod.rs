//! JWT Authentication and Middleware
//!
//! This module provides authentication infrastructure for the Orderdesk API,
//! including JWT token generation/validation and Axum middleware.
//!
//! # Module Structure
//!
//! - [`auth::jwt`](crate::auth::jwt) - password hashing, JWT token encoding, decoding, and claims
//! - [`auth::middleware`](crate::auth::middleware) - Axum layers and extractors for authentication
//!
//! # Security Features
//!
//! - **Password Hashing**: Uses Argon2id (memory-hard) for secure password storage
//! - **JWT Tokens**: HS256 signed tokens with configurable expiration (1 hour by default)
//! - **Claims**: the subject is the user id; no other user data is embedded
//!
//! # Usage
//!
//! ## Protecting Routes
//!
//! The middleware validates `Authorization: Bearer <token>` headers and
//! injects [`Claims`](crate::types::Claims) into the request extensions:
//!
//! ```ignore
//! use orderdesk::auth::middleware::auth_middleware;
//!
//! let protected = Router::new()
//!     .route("/clients/{client_id}/orders", get(handler))
//!     .layer(middleware::from_fn(move |req, next| {
//!         auth_middleware(auth_service.clone(), req, next)
//!     }));
//! ```
//!
//! ## Extracting Claims in Handlers
//!
//! ```ignore
//! async fn protected_handler(AuthUser(claims): AuthUser) -> impl IntoResponse {
//!     format!("Hello, {}!", claims.sub)
//! }
//! ```
//!
//! # Configuration
//!
//! The signing secret and token lifetime come from the environment
//! (`JWT_SECRET`, `TOKEN_EXPIRY`); there is no built-in fallback secret.

/// JWT token generation, validation, and password hashing services.
pub mod jwt;
/// Authentication middleware and extractors for protected routes.
pub mod middleware;
