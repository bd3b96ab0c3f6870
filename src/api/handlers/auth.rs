use crate::{
    types::{
        AppError, LoginRequest, MessageResponse, RegisterRequest, Result, TokenResponse, User,
    },
    AppState,
};
use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use uuid::Uuid;

/// Register a new user
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = MessageResponse),
        (status = 400, description = "Invalid input or duplicate email")
    ),
    tag = "auth"
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    // Validate input
    if payload.name.trim().is_empty() || payload.email.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Name and email are required".to_string(),
        ));
    }
    if payload.password.len() < 8 {
        return Err(AppError::InvalidInput(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    // Check if user exists
    if state
        .store
        .find_user_by_email(&payload.email)
        .await?
        .is_some()
    {
        return Err(AppError::InvalidInput(
            "A user with this email already exists".to_string(),
        ));
    }

    // Hash password
    let password_hash = state.auth_service.hash_password(&payload.password)?;

    // Create user
    let user = User {
        id: Uuid::new_v4().to_string(),
        email: payload.email,
        password_hash,
        name: payload.name,
        created_at: Utc::now().timestamp(),
    };
    state.store.create_user(&user).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User registered successfully".to_string(),
        }),
    ))
}

/// Login with email and password
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>> {
    // Get user
    let user = state
        .store
        .find_user_by_email(&payload.email)
        .await?
        .ok_or_else(|| AppError::Auth("Invalid email or password".to_string()))?;

    // Verify password
    if !state
        .auth_service
        .verify_password(&payload.password, &user.password_hash)?
    {
        return Err(AppError::Auth("Invalid email or password".to_string()));
    }

    // Issue token
    let token = state.auth_service.issue_token(&user.id)?;

    Ok(Json(TokenResponse { token }))
}
