//! Order pricing.
//!
//! The single place where order totals are computed. Every product lookup
//! completes before the owning create/update operation persists anything,
//! so a pricing failure never leaves a partial order behind.

use crate::db::DocumentStore;
use crate::types::{AppError, OrderItem, Result};
use std::sync::Arc;

/// Resolves order items against the product catalog and computes totals.
pub struct PricingService {
    store: Arc<dyn DocumentStore>,
}

impl PricingService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Validates the items and computes the order total.
    ///
    /// Items are resolved in the given order; the first unknown product
    /// aborts the whole operation with that product id in the error. The
    /// total uses each product's price at lookup time.
    pub async fn price_items(&self, items: &[OrderItem]) -> Result<f64> {
        if items.is_empty() {
            return Err(AppError::InvalidInput(
                "An order must contain at least one item".to_string(),
            ));
        }

        for item in items {
            if item.quantity < 1 {
                return Err(AppError::InvalidInput(format!(
                    "Item quantity for product {} must be at least 1",
                    item.product_id
                )));
            }
        }

        let mut total = 0.0;
        for item in items {
            let product = self
                .store
                .get_product(&item.product_id)
                .await?
                .ok_or_else(|| AppError::UnknownProduct(item.product_id.clone()))?;

            total += product.price * f64::from(item.quantity);
        }

        Ok(total)
    }
}
