use crate::auth::jwt::AuthService;
use crate::AppState;
use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;

pub fn create_router(auth_service: Arc<AuthService>) -> Router<AppState> {
    let public_routes = Router::new()
        // Public routes (no auth required)
        .route("/auth/register", post(crate::api::handlers::auth::register))
        .route("/auth/login", post(crate::api::handlers::auth::login))
        .route(
            "/clients",
            get(crate::api::handlers::clients::list_clients)
                .post(crate::api::handlers::clients::create_client),
        )
        .route(
            "/clients/{client_id}",
            get(crate::api::handlers::clients::get_client)
                .put(crate::api::handlers::clients::update_client)
                .delete(crate::api::handlers::clients::delete_client),
        )
        .route(
            "/orders",
            get(crate::api::handlers::orders::list_orders)
                .post(crate::api::handlers::orders::create_order),
        )
        .route(
            "/orders/{id}",
            get(crate::api::handlers::orders::get_order)
                .put(crate::api::handlers::orders::update_order)
                .delete(crate::api::handlers::orders::delete_order),
        )
        .route(
            "/orders/{id}/cancel",
            patch(crate::api::handlers::orders::cancel_order),
        )
        .route("/api-docs", get(crate::api::docs::serve_openapi));

    let protected_routes = Router::new()
        // Client-scoped order routes (auth required)
        .route(
            "/clients/{client_id}/orders",
            get(crate::api::handlers::client_orders::list_client_orders)
                .post(crate::api::handlers::client_orders::create_client_order),
        )
        .route(
            "/clients/{client_id}/orders/{order_id}",
            get(crate::api::handlers::client_orders::get_client_order)
                .put(crate::api::handlers::client_orders::update_client_order)
                .delete(crate::api::handlers::client_orders::delete_client_order),
        )
        .layer(middleware::from_fn(move |req, next| {
            crate::auth::middleware::auth_middleware(auth_service.clone(), req, next)
        }));

    public_routes.merge(protected_routes)
}
