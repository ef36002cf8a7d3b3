/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /auth/register` - Create an account and get a token
/// - `POST /auth/login` - Exchange credentials for a token
/// - `GET /auth/me` - Current account (bearer token)
///
/// Login failures use one message for "unknown email" and "wrong password"
/// so responses do not reveal which addresses are registered.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::{Deserialize, Serialize};
use taskflow_shared::{
    auth::{jwt, middleware::AuthContext, password},
    models::user::UserSummary,
    store::NewUser,
};
use validator::Validate;

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name
    #[validate(required(message = "Name is required"), length(min = 1, message = "Name is required"))]
    pub name: Option<String>,

    /// Email address
    #[validate(required(message = "Email is required"), length(min = 1, message = "Email is required"))]
    pub email: Option<String>,

    /// Password (stored only as a salted hash)
    #[validate(required(message = "Password is required"), length(min = 1, message = "Password is required"))]
    pub password: Option<String>,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address
    #[validate(required(message = "Email is required"), length(min = 1, message = "Email is required"))]
    pub email: Option<String>,

    /// Password
    #[validate(required(message = "Password is required"), length(min = 1, message = "Password is required"))]
    pub password: Option<String>,
}

/// Response for register and login: a fresh token plus the account
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    /// Signed bearer token
    pub token: String,

    /// The account, without any credential material
    pub user: UserSummary,
}

/// Response for the current-account endpoint
#[derive(Debug, Serialize)]
pub struct MeResponse {
    /// The authenticated account
    pub user: UserSummary,
}

/// Register a new account
///
/// # Endpoint
///
/// ```text
/// POST /auth/register
/// Content-Type: application/json
///
/// {
///   "name": "Alice",
///   "email": "alice@example.com",
///   "password": "pw123"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: a field is missing or empty
/// - `409 Conflict`: email already registered (case-sensitive exact match)
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    req.validate()?;

    let name = req.name.unwrap_or_default();
    let email = req.email.unwrap_or_default();
    let password = req.password.unwrap_or_default();

    let password_hash = password::hash_password(&password)?;

    let user = state
        .store
        .create_user(NewUser {
            name,
            email,
            password_hash,
        })
        .await?;

    tracing::info!(user_id = user.id, "Registered new account");

    let claims = jwt::Claims::new(user.id, state.token_ttl());
    let token = jwt::create_token(&claims, state.jwt_secret())?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: user.summary(),
        }),
    ))
}

/// Exchange credentials for a token
///
/// # Endpoint
///
/// ```text
/// POST /auth/login
/// Content-Type: application/json
///
/// {
///   "email": "alice@example.com",
///   "password": "pw123"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: a field is missing or empty
/// - `401 Unauthorized`: unknown email or wrong password (same message for
///   both)
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    req.validate()?;

    let email = req.email.unwrap_or_default();
    let password = req.password.unwrap_or_default();

    let user = state
        .store
        .find_user_by_email(&email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid credentials".to_string()))?;

    let valid = password::verify_password(&password, &user.password_hash)?;
    if !valid {
        return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
    }

    let claims = jwt::Claims::new(user.id, state.token_ttl());
    let token = jwt::create_token(&claims, state.jwt_secret())?;

    Ok(Json(AuthResponse {
        token,
        user: user.summary(),
    }))
}

/// Current account
///
/// # Endpoint
///
/// ```text
/// GET /auth/me
/// Authorization: Bearer <token>
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: missing, malformed, expired, or unverifiable token
pub async fn me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<MeResponse>> {
    let user = state
        .store
        .find_user_by_id(auth.user_id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid token".to_string()))?;

    Ok(Json(MeResponse {
        user: user.summary(),
    }))
}
