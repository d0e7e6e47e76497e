//! Session identity: cookie-backed sessions holding the logged-in user id
//!
//! Only the user id is kept in the session. Handlers re-read the user from
//! storage on every request.

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::{cookie::SameSite, Expiry, Session, SessionManagerLayer, SessionStore};
use uuid::Uuid;

use crate::{
    config::SessionConfig,
    error::{AppError, AppResult},
};

/// Key under which the authenticated user's id is stored
pub const SESSION_USER_ID_KEY: &str = "user_id";

/// Create the session layer over `store`
pub fn create_session_layer<Store: SessionStore>(
    store: Store,
    config: &SessionConfig,
) -> SessionManagerLayer<Store> {
    SessionManagerLayer::new(store)
        .with_name(config.cookie_name.clone())
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::hours(config.expiry_hours),
        ))
        .with_secure(config.secure)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

/// Bind the session to `user_id`, issuing a fresh session id
pub async fn establish(session: &Session, user_id: Uuid) -> AppResult<()> {
    session.cycle_id().await?;
    session.insert(SESSION_USER_ID_KEY, user_id).await?;
    Ok(())
}

/// Id of the logged-in user, or `UserNotFound` for anonymous sessions
pub async fn current_user_id(session: &Session) -> AppResult<Uuid> {
    session
        .get::<Uuid>(SESSION_USER_ID_KEY)
        .await?
        .ok_or(AppError::UserNotFound)
}

/// Destroy the session and its stored data
pub async fn terminate(session: &Session) -> AppResult<()> {
    session.flush().await?;
    Ok(())
}

/// Extractor for the id of the logged-in user
pub struct SessionUser(pub Uuid);

impl<S> FromRequestParts<S> for SessionUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or_else(|| AppError::Session("Session layer is not installed".to_string()))?;

        current_user_id(session).await.map(SessionUser)
    }
}
