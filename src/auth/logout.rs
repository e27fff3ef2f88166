use axum::{debug_handler, Json};
use serde_json::Value;
use tower_sessions::Session;

use crate::{session, success, AppResult};

#[debug_handler]
pub(crate) async fn logout(session: Session) -> AppResult<Json<Value>> {
    session::destroy(&session).await?;
    Ok(success())
}
