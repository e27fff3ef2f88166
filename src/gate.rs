//! Access control as extractors. Both reject before the handler body runs, so a
//! refused request never reaches a store.

use anyhow::anyhow;
use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

use crate::{
    session::{self, SessionUser},
    store::Role,
    AppError,
};

/// Any signed-in account.
pub struct Member(pub SessionUser);

/// A signed-in administrator.
pub struct Admin(pub SessionUser);

pub fn require_authenticated(user: Option<SessionUser>) -> Result<SessionUser, AppError> {
    user.ok_or(AppError::Unauthorized)
}

/// No session is `Unauthorized`, not `Forbidden`.
pub fn require_administrator(user: Option<SessionUser>) -> Result<SessionUser, AppError> {
    let user = require_authenticated(user)?;
    if user.role == Role::Admin {
        Ok(user)
    } else {
        Err(AppError::Forbidden)
    }
}

async fn session_user<S: Send + Sync>(parts: &mut Parts, state: &S) -> Result<Option<SessionUser>, AppError> {
    let session = Session::from_request_parts(parts, state)
        .await
        .map_err(|(_, msg)| anyhow!("session layer missing: {msg}"))?;
    session::current(&session).await
}

impl<S: Send + Sync> FromRequestParts<S> for Member {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        require_authenticated(session_user(parts, state).await?).map(Member)
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Admin {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        require_administrator(session_user(parts, state).await?).map(Admin)
    }
}
