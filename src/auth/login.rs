use axum::{debug_handler, extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_sessions::Session;
use tracing::info;

use crate::{
    extract::Payload,
    session::{self, SessionUser},
    store::AccountStore,
    AppError, AppResult, AppState,
};

#[derive(Deserialize)]
pub(crate) struct LoginRequest {
    #[serde(default, alias = "identity")]
    email: String,
    #[serde(default, alias = "secret", alias = "senha")]
    password: String,
}

#[debug_handler(state = AppState)]
pub(crate) async fn login(
    State(accounts): State<AccountStore>,
    session: Session,
    Payload(LoginRequest { email, password }): Payload<LoginRequest>,
) -> AppResult<Json<Value>> {
    let Some(account) = accounts.verify_credentials(&email, &password).await? else {
        info!(%email, "login rejected");
        return Err(AppError::invalid_credentials());
    };

    session::establish(&session, SessionUser::from(&account)).await?;
    info!(%email, role = ?account.role, "login");

    Ok(Json(json!({ "success": true, "role": account.role })))
}
