use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

// ============= Domain Records =============

/// A client that can own orders.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Client {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// A purchasable product. Read-only lookup target for order pricing;
/// products are seeded into the store, never created through the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
}

/// A single line of an order.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: String,
    pub quantity: u32,
}

/// Order lifecycle status. Any status may replace any other; there is no
/// transition graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Shipped,
    Delivered,
    Canceled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Canceled => "canceled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(OrderStatus::Pending),
            "shipped" => Some(OrderStatus::Shipped),
            "delivered" => Some(OrderStatus::Delivered),
            "canceled" => Some(OrderStatus::Canceled),
            _ => None,
        }
    }
}

/// An order as persisted. `total_price` is derived server-side from the
/// items at write time and never trusted from client input.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub client_id: String,
    pub items: Vec<OrderItem>,
    pub total_price: f64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// Credential record. The password is stored as an argon2 PHC digest,
/// never the plaintext.
#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub created_at: i64,
}

// ============= Authentication Types =============

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// JWT claims: subject is the user id, expiry is one hour from issuance
/// by default configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub iat: usize,
}

// ============= API Request/Response Types =============

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateClientRequest {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateClientRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub client_id: String,
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateOrderRequest {
    pub items: Vec<OrderItem>,
}

/// Order creation body for the client-scoped routes, where the owning
/// client comes from the path instead of the payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateScopedOrderRequest {
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListClientsQuery {
    /// 1-based page number (default 1)
    pub page: Option<u32>,
    /// Page size (default 10)
    pub limit: Option<u32>,
    /// Case-insensitive substring filter on client name
    pub name: Option<String>,
    /// Case-insensitive substring filter on client email
    pub email: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListOrdersQuery {
    /// 1-based page number (default 1)
    pub page: Option<u32>,
    /// Page size (default 10)
    pub limit: Option<u32>,
    /// Exact-match status filter
    pub status: Option<OrderStatus>,
}

/// Offset-based pagination envelope.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u64,
    pub data: Vec<T>,
}

impl<T> Page<T> {
    /// Build a page envelope; `total_pages = ceil(total / limit)`.
    pub fn new(data: Vec<T>, total: u64, page: u32, limit: u32) -> Self {
        let limit = limit.max(1);
        Self {
            total,
            page,
            limit,
            total_pages: total.div_ceil(u64::from(limit)),
            data,
        }
    }
}

// ============= Resolved Order Views =============

/// An order item joined with its product (name, price) for display.
/// `product` is null when the referenced product no longer exists.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemView {
    pub product_id: String,
    pub quantity: u32,
    pub product: Option<Product>,
}

/// An order joined with its client and per-item products for display.
/// `client` is null when the referenced client no longer exists.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    pub id: String,
    pub client_id: String,
    pub client: Option<Client>,
    pub items: Vec<OrderItemView>,
    pub total_price: f64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Product {0} does not exist")]
    UnknownProduct(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;

        let (status, message) = match self {
            AppError::Database(msg) | AppError::Internal(msg) => {
                tracing::error!(error = %msg, "internal error");
                let body = serde_json::json!({
                    "message": "Internal server error",
                    "error": msg,
                });
                return (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response();
            }
            AppError::Auth(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::UnknownProduct(id) => (
                StatusCode::BAD_REQUEST,
                format!("Product {} does not exist", id),
            ),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
        };

        let body = serde_json::json!({
            "message": message
        });

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_arithmetic_rounds_up() {
        let page = Page::<u32>::new(vec![], 3, 2, 1);
        assert_eq!(page.total_pages, 3);

        let page = Page::<u32>::new(vec![], 10, 1, 3);
        assert_eq!(page.total_pages, 4);

        let page = Page::<u32>::new(vec![], 0, 1, 10);
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn order_status_round_trips_through_str() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
            OrderStatus::Canceled,
        ] {
            assert_eq!(OrderStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(OrderStatus::parse("returned"), None);
    }

    #[test]
    fn wire_field_names_are_camel_case() {
        let order = Order {
            id: "o-1".to_string(),
            client_id: "c-1".to_string(),
            items: vec![OrderItem {
                product_id: "p-1".to_string(),
                quantity: 2,
            }],
            total_price: 20.0,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&order).expect("serialize order");
        assert!(json.get("clientId").is_some());
        assert!(json.get("totalPrice").is_some());
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["status"], "pending");
        assert!(json["items"][0].get("productId").is_some());
    }
}
