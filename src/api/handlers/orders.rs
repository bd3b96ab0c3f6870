//! Order management handlers.
//!
//! Order writes go through the pricing service: the client reference and
//! every product reference are resolved before anything is persisted, and
//! the total price is always recomputed server-side. Reads join the
//! referenced client and products for display.

use super::{ensure_id_format, paging};
use crate::{
    db::DocumentStore,
    types::{
        AppError, CreateOrderRequest, ListOrdersQuery, Order, OrderItem, OrderItemView,
        OrderStatus, OrderView, Page, Result, UpdateOrderRequest,
    },
    AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use uuid::Uuid;

/// Join an order with its client and per-item products for display.
/// Dangling references (the store has no foreign keys) resolve to null.
pub(crate) async fn resolve_order(store: &dyn DocumentStore, order: Order) -> Result<OrderView> {
    let client = store.get_client(&order.client_id).await?;

    let mut items = Vec::with_capacity(order.items.len());
    for item in &order.items {
        let product = store.get_product(&item.product_id).await?;
        items.push(OrderItemView {
            product_id: item.product_id.clone(),
            quantity: item.quantity,
            product,
        });
    }

    Ok(OrderView {
        id: order.id,
        client_id: order.client_id,
        client,
        items,
        total_price: order.total_price,
        status: order.status,
        created_at: order.created_at,
    })
}

/// Price the items and persist a new order for the given client.
///
/// Shared by the top-level and client-scoped creation routes. The pricing
/// check completes for all items before the order is written.
pub(crate) async fn create_priced_order(
    state: &AppState,
    client_id: String,
    items: Vec<OrderItem>,
) -> Result<OrderView> {
    let total_price = state.pricing.price_items(&items).await?;

    let order = Order {
        id: Uuid::new_v4().to_string(),
        client_id,
        items,
        total_price,
        status: OrderStatus::Pending,
        created_at: Utc::now(),
    };
    state.store.create_order(&order).await?;

    resolve_order(state.store.as_ref(), order).await
}

/// Reprice the given items and replace an order's items and total.
pub(crate) async fn reprice_order(
    state: &AppState,
    order_id: &str,
    items: Vec<OrderItem>,
) -> Result<OrderView> {
    let total_price = state.pricing.price_items(&items).await?;

    let order = state
        .store
        .update_order_items(order_id, &items, total_price)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Order {} not found", order_id)))?;

    resolve_order(state.store.as_ref(), order).await
}

/// List orders with pagination and an optional status filter.
#[utoipa::path(
    get,
    path = "/orders",
    params(ListOrdersQuery),
    responses(
        (status = 200, description = "Paginated order list", body = Page<OrderView>)
    ),
    tag = "orders"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<ListOrdersQuery>,
) -> Result<Json<Page<OrderView>>> {
    let (page, limit) = paging(query.page, query.limit);

    let (orders, total) = state
        .store
        .list_orders(page, limit, query.status, None)
        .await?;

    let mut views = Vec::with_capacity(orders.len());
    for order in orders {
        views.push(resolve_order(state.store.as_ref(), order).await?);
    }

    Ok(Json(Page::new(views, total, page, limit)))
}

/// Get an order by id, with resolved client and products.
#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(
        ("id" = String, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Order found", body = OrderView),
        (status = 400, description = "Malformed order id"),
        (status = 404, description = "Order not found")
    ),
    tag = "orders"
)]
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<OrderView>> {
    ensure_id_format(&id, "order")?;

    let order = state
        .store
        .get_order(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Order {} not found", id)))?;

    Ok(Json(resolve_order(state.store.as_ref(), order).await?))
}

/// Create an order.
///
/// The client must exist and every item's product must exist; the total
/// price is computed server-side.
#[utoipa::path(
    post,
    path = "/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created", body = OrderView),
        (status = 400, description = "Unknown client, unknown product, or invalid items")
    ),
    tag = "orders"
)]
pub async fn create_order(
    State(state): State<AppState>,
    Json(payload): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderView>)> {
    // Resolve the client before pricing; nothing is persisted until both
    // checks pass
    if state.store.get_client(&payload.client_id).await?.is_none() {
        return Err(AppError::InvalidInput(format!(
            "Client {} does not exist",
            payload.client_id
        )));
    }

    let view = create_priced_order(&state, payload.client_id, payload.items).await?;

    Ok((StatusCode::CREATED, Json(view)))
}

/// Replace an order's items, recomputing the total price.
#[utoipa::path(
    put,
    path = "/orders/{id}",
    params(
        ("id" = String, Path, description = "Order ID")
    ),
    request_body = UpdateOrderRequest,
    responses(
        (status = 200, description = "Order updated", body = OrderView),
        (status = 400, description = "Unknown product or invalid items"),
        (status = 404, description = "Order not found")
    ),
    tag = "orders"
)]
pub async fn update_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateOrderRequest>,
) -> Result<Json<OrderView>> {
    ensure_id_format(&id, "order")?;

    if state.store.get_order(&id).await?.is_none() {
        return Err(AppError::NotFound(format!("Order {} not found", id)));
    }

    let view = reprice_order(&state, &id, payload.items).await?;

    Ok(Json(view))
}

/// Cancel an order.
///
/// Sets the status to `canceled` unconditionally; there is no transition
/// graph.
#[utoipa::path(
    patch,
    path = "/orders/{id}/cancel",
    params(
        ("id" = String, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Order canceled", body = OrderView),
        (status = 400, description = "Malformed order id"),
        (status = 404, description = "Order not found")
    ),
    tag = "orders"
)]
pub async fn cancel_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<OrderView>> {
    ensure_id_format(&id, "order")?;

    let order = state
        .store
        .set_order_status(&id, OrderStatus::Canceled)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Order {} not found", id)))?;

    Ok(Json(resolve_order(state.store.as_ref(), order).await?))
}

/// Delete an order.
#[utoipa::path(
    delete,
    path = "/orders/{id}",
    params(
        ("id" = String, Path, description = "Order ID")
    ),
    responses(
        (status = 204, description = "Order deleted"),
        (status = 400, description = "Malformed order id"),
        (status = 404, description = "Order not found")
    ),
    tag = "orders"
)]
pub async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    ensure_id_format(&id, "order")?;

    if !state.store.delete_order(&id).await? {
        return Err(AppError::NotFound(format!("Order {} not found", id)));
    }

    Ok(StatusCode::NO_CONTENT)
}
