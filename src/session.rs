//! Server-side sessions. The cookie carries only an opaque id; who the caller is and
//! what role they hold are read back from the store on every request.

use serde::{Deserialize, Serialize};
use tower_sessions::{cookie::SameSite, Expiry, MemoryStore, Session, SessionManagerLayer};

use crate::{
    store::{Account, Role},
    AppResult,
};

pub const COOKIE_NAME: &str = "daigyo_session";
pub const USER: &str = "user";

/// Written once at login and only ever replaced whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub account_id: i64,
    pub name: String,
    pub role: Role,
}

impl From<&Account> for SessionUser {
    fn from(account: &Account) -> Self {
        Self {
            account_id: account.id,
            name: account.name.clone(),
            role: account.role,
        }
    }
}

pub fn layer(inactivity: time::Duration, secure: bool) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_name(COOKIE_NAME)
        .with_secure(secure)
        .with_http_only(true)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(inactivity))
}

/// A fresh id is issued so a pre-login cookie can't be carried into the authenticated state.
pub async fn establish(session: &Session, user: SessionUser) -> AppResult<()> {
    session.cycle_id().await?;
    session.insert(USER, user).await?;
    Ok(())
}

pub async fn current(session: &Session) -> AppResult<Option<SessionUser>> {
    Ok(session.get::<SessionUser>(USER).await?)
}

/// Removes the record from the store. Fine to call on an empty session.
pub async fn destroy(session: &Session) -> AppResult<()> {
    session.flush().await?;
    Ok(())
}
