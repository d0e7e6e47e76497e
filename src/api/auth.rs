//! Authentication endpoints

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tower_sessions::Session;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{Credentials, UserInfo},
    AppState,
};

use super::session::{self, SessionUser};

/// Logout response
#[derive(Serialize, ToSchema)]
pub struct LogoutResponse {
    pub status: String,
}

/// Register a new account and log it in
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "auth",
    request_body = Credentials,
    responses(
        (status = 201, description = "Account created", body = UserInfo),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Username already exists")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> AppResult<(StatusCode, Json<UserInfo>)> {
    let Json(credentials) = payload?;
    let user = state.services.auth.register(credentials).await?;
    session::establish(&session, user.id).await?;

    Ok((StatusCode::CREATED, Json(UserInfo::from(&user))))
}

/// Login with username and password
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = Credentials,
    responses(
        (status = 200, description = "Login successful", body = UserInfo),
        (status = 401, description = "Invalid username or password")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    payload: Result<Json<Credentials>, JsonRejection>,
) -> AppResult<Json<UserInfo>> {
    let Json(credentials) = payload?;
    let user = state.services.auth.login(credentials).await?;
    session::establish(&session, user.id).await?;

    Ok(Json(UserInfo::from(&user)))
}

/// End the current session
#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "auth",
    responses(
        (status = 200, description = "Session terminated", body = LogoutResponse),
        (status = 500, description = "Session teardown failed")
    )
)]
pub async fn logout(session: Session) -> AppResult<Json<LogoutResponse>> {
    session::terminate(&session).await?;
    tracing::debug!("Session terminated");

    Ok(Json(LogoutResponse {
        status: "logged_out".to_string(),
    }))
}

/// Get the logged-in user
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "auth",
    responses(
        (status = 200, description = "Current user", body = UserInfo),
        (status = 401, description = "Not logged in")
    )
)]
pub async fn me(
    State(state): State<AppState>,
    SessionUser(user_id): SessionUser,
) -> AppResult<Json<UserInfo>> {
    let user = state.services.auth.current_user(user_id).await?;
    Ok(Json(UserInfo::from(&user)))
}
