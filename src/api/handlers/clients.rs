//! Client management handlers.
//!
//! Plain CRUD over client records with offset-based pagination and
//! case-insensitive substring filters.

use super::{ensure_id_format, paging};
use crate::{
    types::{
        AppError, Client, CreateClientRequest, ListClientsQuery, Page, Result,
        UpdateClientRequest,
    },
    AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

/// List clients with pagination and optional filters.
#[utoipa::path(
    get,
    path = "/clients",
    params(ListClientsQuery),
    responses(
        (status = 200, description = "Paginated client list", body = Page<Client>)
    ),
    tag = "clients"
)]
pub async fn list_clients(
    State(state): State<AppState>,
    Query(query): Query<ListClientsQuery>,
) -> Result<Json<Page<Client>>> {
    let (page, limit) = paging(query.page, query.limit);

    let (clients, total) = state
        .store
        .list_clients(page, limit, query.name.as_deref(), query.email.as_deref())
        .await?;

    Ok(Json(Page::new(clients, total, page, limit)))
}

/// Get a client by id.
#[utoipa::path(
    get,
    path = "/clients/{client_id}",
    params(
        ("client_id" = String, Path, description = "Client ID")
    ),
    responses(
        (status = 200, description = "Client found", body = Client),
        (status = 400, description = "Malformed client id"),
        (status = 404, description = "Client not found")
    ),
    tag = "clients"
)]
pub async fn get_client(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> Result<Json<Client>> {
    ensure_id_format(&client_id, "client")?;

    let client = state
        .store
        .get_client(&client_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Client {} not found", client_id)))?;

    Ok(Json(client))
}

/// Create a client.
#[utoipa::path(
    post,
    path = "/clients",
    request_body = CreateClientRequest,
    responses(
        (status = 201, description = "Client created", body = Client),
        (status = 400, description = "Missing name or email"),
        (status = 409, description = "Duplicate email")
    ),
    tag = "clients"
)]
pub async fn create_client(
    State(state): State<AppState>,
    Json(payload): Json<CreateClientRequest>,
) -> Result<(StatusCode, Json<Client>)> {
    if payload.name.trim().is_empty() || payload.email.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Name and email are required".to_string(),
        ));
    }

    let client = Client {
        id: Uuid::new_v4().to_string(),
        name: payload.name,
        email: payload.email,
    };
    state.store.create_client(&client).await?;

    Ok((StatusCode::CREATED, Json(client)))
}

/// Update a client's name and/or email.
#[utoipa::path(
    put,
    path = "/clients/{client_id}",
    params(
        ("client_id" = String, Path, description = "Client ID")
    ),
    request_body = UpdateClientRequest,
    responses(
        (status = 200, description = "Client updated", body = Client),
        (status = 400, description = "Malformed id or empty field"),
        (status = 404, description = "Client not found"),
        (status = 409, description = "Duplicate email")
    ),
    tag = "clients"
)]
pub async fn update_client(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
    Json(payload): Json<UpdateClientRequest>,
) -> Result<Json<Client>> {
    ensure_id_format(&client_id, "client")?;

    if payload.name.as_deref().is_some_and(|n| n.trim().is_empty())
        || payload
            .email
            .as_deref()
            .is_some_and(|e| e.trim().is_empty())
    {
        return Err(AppError::InvalidInput(
            "Name and email cannot be empty".to_string(),
        ));
    }

    let client = state
        .store
        .update_client(&client_id, payload.name.as_deref(), payload.email.as_deref())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Client {} not found", client_id)))?;

    Ok(Json(client))
}

/// Delete a client.
#[utoipa::path(
    delete,
    path = "/clients/{client_id}",
    params(
        ("client_id" = String, Path, description = "Client ID")
    ),
    responses(
        (status = 204, description = "Client deleted"),
        (status = 400, description = "Malformed client id"),
        (status = 404, description = "Client not found")
    ),
    tag = "clients"
)]
pub async fn delete_client(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
) -> Result<StatusCode> {
    ensure_id_format(&client_id, "client")?;

    if !state.store.delete_client(&client_id).await? {
        return Err(AppError::NotFound(format!(
            "Client {} not found",
            client_id
        )));
    }

    Ok(StatusCode::NO_CONTENT)
}
