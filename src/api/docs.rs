//! Generated OpenAPI description.

use crate::types::{
    Client, CreateClientRequest, CreateOrderRequest, CreateScopedOrderRequest, LoginRequest,
    MessageResponse, Order, OrderItem, OrderItemView, OrderStatus, OrderView, Page, Product,
    RegisterRequest, TokenResponse, UpdateClientRequest, UpdateOrderRequest,
};
use axum::Json;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Orderdesk API",
        description = "Client and order management API with JWT authentication and server-side order pricing"
    ),
    paths(
        crate::api::handlers::auth::register,
        crate::api::handlers::auth::login,
        crate::api::handlers::clients::list_clients,
        crate::api::handlers::clients::get_client,
        crate::api::handlers::clients::create_client,
        crate::api::handlers::clients::update_client,
        crate::api::handlers::clients::delete_client,
        crate::api::handlers::orders::list_orders,
        crate::api::handlers::orders::get_order,
        crate::api::handlers::orders::create_order,
        crate::api::handlers::orders::update_order,
        crate::api::handlers::orders::cancel_order,
        crate::api::handlers::orders::delete_order,
        crate::api::handlers::client_orders::list_client_orders,
        crate::api::handlers::client_orders::create_client_order,
        crate::api::handlers::client_orders::get_client_order,
        crate::api::handlers::client_orders::update_client_order,
        crate::api::handlers::client_orders::delete_client_order,
    ),
    components(schemas(
        Client,
        Product,
        OrderItem,
        OrderStatus,
        Order,
        OrderItemView,
        OrderView,
        RegisterRequest,
        LoginRequest,
        TokenResponse,
        MessageResponse,
        CreateClientRequest,
        UpdateClientRequest,
        CreateOrderRequest,
        UpdateOrderRequest,
        CreateScopedOrderRequest,
        Page<Client>,
        Page<OrderView>,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "clients", description = "Client CRUD"),
        (name = "orders", description = "Order CRUD with server-side pricing"),
        (name = "client-orders", description = "Client-scoped order CRUD (bearer token required)"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Serve the generated OpenAPI document as JSON.
pub async fn serve_openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
