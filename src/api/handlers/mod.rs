//! API request handlers.
//!
//! This module contains all HTTP request handlers organized by functionality.

/// Authentication handlers (login, register).
pub mod auth;
/// Client-scoped order handlers (bearer token required).
pub mod client_orders;
/// Client CRUD handlers.
pub mod clients;
/// Order CRUD and pricing handlers.
pub mod orders;

use crate::types::{AppError, Result};
use uuid::Uuid;

/// Clamp pagination parameters to the documented defaults (page 1, limit 10).
pub(crate) fn paging(page: Option<u32>, limit: Option<u32>) -> (u32, u32) {
    (page.unwrap_or(1).max(1), limit.unwrap_or(10).max(1))
}

/// Reject malformed ids before touching the store, so a bad id format is a
/// 400 rather than a 404.
pub(crate) fn ensure_id_format(id: &str, what: &str) -> Result<()> {
    Uuid::parse_str(id)
        .map(|_| ())
        .map_err(|_| AppError::InvalidInput(format!("Invalid {} id format", what)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paging_defaults_and_clamps() {
        assert_eq!(paging(None, None), (1, 10));
        assert_eq!(paging(Some(0), Some(0)), (1, 1));
        assert_eq!(paging(Some(3), Some(25)), (3, 25));
    }

    #[test]
    fn id_format_check_distinguishes_bad_ids() {
        assert!(ensure_id_format("not-a-uuid", "client").is_err());
        assert!(ensure_id_format("550e8400-e29b-41d4-a716-446655440000", "client").is_ok());
    }
}
