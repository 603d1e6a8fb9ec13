//! Auth route handlers.
//!
//! Email + password login, signup, logout and user lookup. The logged-in
//! user is kept in the session; every response carries the sanitized
//! [`PublicUser`], never the stored record.

use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tower_sessions::Session;
use tracing::instrument;

use artconnect_core::UserId;

use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::middleware::{RequireAuth, clear_current_user, set_current_user};
use crate::models::{CurrentUser, PublicUser, User};
use crate::services::auth::AuthService;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub user_type: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    pub user_id: Option<String>,
}

/// Put `user` in the session and tag the Sentry scope.
async fn log_in(session: &Session, user: &User) -> Result<()> {
    set_current_user(session, &CurrentUser::from(user))
        .await
        .map_err(|e| AppError::Internal(format!("Session error: {e}")))?;
    set_sentry_user(&user.id, Some(user.email.as_str()));
    Ok(())
}

/// Handle login.
///
/// POST /api/auth/login
#[instrument(skip(state, session, payload))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<Value>> {
    let Json(form) = payload?;
    let user = AuthService::new(state.db())
        .login(&form.email, &form.password)
        .await?;

    log_in(&session, &user).await?;
    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(json!({
        "user": PublicUser::from(&user),
        "message": "Login successful",
    })))
}

/// Handle signup. The new account is logged in straight away.
///
/// POST /api/auth/signup
#[instrument(skip(state, session, payload))]
pub async fn signup(
    State(state): State<AppState>,
    session: Session,
    payload: std::result::Result<Json<SignupRequest>, JsonRejection>,
) -> Result<Json<Value>> {
    let Json(form) = payload?;
    let user = AuthService::new(state.db())
        .register(&form.email, &form.password, &form.name, &form.user_type)
        .await?;

    log_in(&session, &user).await?;

    Ok(Json(json!({
        "user": PublicUser::from(&user),
        "message": "Registration successful",
    })))
}

/// Handle logout.
///
/// POST /api/auth/logout
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Json<Value>> {
    clear_current_user(&session)
        .await
        .map_err(|e| AppError::Internal(format!("Session error: {e}")))?;
    clear_sentry_user();

    Ok(Json(json!({ "message": "Logout successful" })))
}

/// Look up a user by ID.
///
/// GET /api/auth/user?userId=
#[instrument(skip(state))]
pub async fn user(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<Value>> {
    let user_id = query
        .user_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("User ID is required".to_string()))?;

    let user = AuthService::new(state.db())
        .get_user(&UserId::new(user_id.trim()))
        .await?;

    Ok(Json(json!({ "user": PublicUser::from(&user) })))
}

/// The session user, read back from the store.
///
/// GET /api/auth/me
#[instrument(skip_all)]
pub async fn me(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
) -> Result<Json<Value>> {
    let user = AuthService::new(state.db()).get_user(&current.id).await?;
    Ok(Json(json!({ "user": PublicUser::from(&user) })))
}
