//! Client-scoped order handlers.
//!
//! Same operations as the top-level order routes, scoped to one owning
//! client. Unlike the top-level trees, every route here sits behind the
//! bearer-token middleware. An order that belongs to a different client is
//! a 404 within the scope.

use super::orders::{create_priced_order, reprice_order, resolve_order};
use super::{ensure_id_format, paging};
use crate::auth::middleware::AuthUser;
use crate::{
    types::{
        AppError, CreateScopedOrderRequest, ListOrdersQuery, Order, OrderView, Page, Result,
        UpdateOrderRequest,
    },
    AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

/// Fetch an order and check it belongs to the scoping client.
async fn scoped_order(state: &AppState, client_id: &str, order_id: &str) -> Result<Order> {
    ensure_id_format(client_id, "client")?;
    ensure_id_format(order_id, "order")?;

    let order = state
        .store
        .get_order(order_id)
        .await?
        .filter(|order| order.client_id == client_id)
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "Order {} not found for client {}",
                order_id, client_id
            ))
        })?;

    Ok(order)
}

/// List one client's orders.
#[utoipa::path(
    get,
    path = "/clients/{client_id}/orders",
    params(
        ("client_id" = String, Path, description = "Owning client ID"),
        ListOrdersQuery
    ),
    responses(
        (status = 200, description = "Paginated order list for the client", body = Page<OrderView>),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Client not found")
    ),
    tag = "client-orders",
    security(("bearer" = []))
)]
pub async fn list_client_orders(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
    Query(query): Query<ListOrdersQuery>,
) -> Result<Json<Page<OrderView>>> {
    ensure_id_format(&client_id, "client")?;

    if state.store.get_client(&client_id).await?.is_none() {
        return Err(AppError::NotFound(format!(
            "Client {} not found",
            client_id
        )));
    }

    let (page, limit) = paging(query.page, query.limit);

    let (orders, total) = state
        .store
        .list_orders(page, limit, query.status, Some(&client_id))
        .await?;

    let mut views = Vec::with_capacity(orders.len());
    for order in orders {
        views.push(resolve_order(state.store.as_ref(), order).await?);
    }

    Ok(Json(Page::new(views, total, page, limit)))
}

/// Create an order for the scoping client.
#[utoipa::path(
    post,
    path = "/clients/{client_id}/orders",
    params(
        ("client_id" = String, Path, description = "Owning client ID")
    ),
    request_body = CreateScopedOrderRequest,
    responses(
        (status = 201, description = "Order created", body = OrderView),
        (status = 400, description = "Unknown product or invalid items"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Client not found")
    ),
    tag = "client-orders",
    security(("bearer" = []))
)]
pub async fn create_client_order(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(client_id): Path<String>,
    Json(payload): Json<CreateScopedOrderRequest>,
) -> Result<(StatusCode, Json<OrderView>)> {
    ensure_id_format(&client_id, "client")?;

    if state.store.get_client(&client_id).await?.is_none() {
        return Err(AppError::NotFound(format!(
            "Client {} not found",
            client_id
        )));
    }

    let view = create_priced_order(&state, client_id, payload.items).await?;
    tracing::debug!(user = %claims.sub, order = %view.id, "order created");

    Ok((StatusCode::CREATED, Json(view)))
}

/// Get one of the client's orders.
#[utoipa::path(
    get,
    path = "/clients/{client_id}/orders/{order_id}",
    params(
        ("client_id" = String, Path, description = "Owning client ID"),
        ("order_id" = String, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Order found", body = OrderView),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No such order for this client")
    ),
    tag = "client-orders",
    security(("bearer" = []))
)]
pub async fn get_client_order(
    State(state): State<AppState>,
    Path((client_id, order_id)): Path<(String, String)>,
) -> Result<Json<OrderView>> {
    let order = scoped_order(&state, &client_id, &order_id).await?;

    Ok(Json(resolve_order(state.store.as_ref(), order).await?))
}

/// Replace the items of one of the client's orders.
#[utoipa::path(
    put,
    path = "/clients/{client_id}/orders/{order_id}",
    params(
        ("client_id" = String, Path, description = "Owning client ID"),
        ("order_id" = String, Path, description = "Order ID")
    ),
    request_body = UpdateOrderRequest,
    responses(
        (status = 200, description = "Order updated", body = OrderView),
        (status = 400, description = "Unknown product or invalid items"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No such order for this client")
    ),
    tag = "client-orders",
    security(("bearer" = []))
)]
pub async fn update_client_order(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path((client_id, order_id)): Path<(String, String)>,
    Json(payload): Json<UpdateOrderRequest>,
) -> Result<Json<OrderView>> {
    scoped_order(&state, &client_id, &order_id).await?;

    let view = reprice_order(&state, &order_id, payload.items).await?;
    tracing::debug!(user = %claims.sub, order = %order_id, "order items replaced");

    Ok(Json(view))
}

/// Delete one of the client's orders.
#[utoipa::path(
    delete,
    path = "/clients/{client_id}/orders/{order_id}",
    params(
        ("client_id" = String, Path, description = "Owning client ID"),
        ("order_id" = String, Path, description = "Order ID")
    ),
    responses(
        (status = 204, description = "Order deleted"),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "No such order for this client")
    ),
    tag = "client-orders",
    security(("bearer" = []))
)]
pub async fn delete_client_order(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path((client_id, order_id)): Path<(String, String)>,
) -> Result<StatusCode> {
    scoped_order(&state, &client_id, &order_id).await?;

    if !state.store.delete_order(&order_id).await? {
        return Err(AppError::NotFound(format!(
            "Order {} not found for client {}",
            order_id, client_id
        )));
    }

    tracing::debug!(user = %claims.sub, order = %order_id, "order deleted");

    Ok(StatusCode::NO_CONTENT)
}
