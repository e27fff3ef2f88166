use axum::{debug_handler, extract::State, Json};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use super::ActiveToggle;
use crate::{
    extract::{Param, Payload},
    gate::Admin,
    store::{AccountStore, AccountView, Role},
    success, success_with, AppError, AppResult, AppState,
};

/// No `role` field: accounts made here are always members.
#[derive(Deserialize)]
pub(crate) struct NewAccount {
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
}

#[debug_handler(state = AppState)]
pub(crate) async fn list(_: Admin, State(accounts): State<AccountStore>) -> AppResult<Json<Vec<AccountView>>> {
    Ok(Json(accounts.list().await?))
}

#[debug_handler(state = AppState)]
pub(crate) async fn create(
    Admin(admin): Admin,
    State(accounts): State<AccountStore>,
    Payload(NewAccount { name, email, password }): Payload<NewAccount>,
) -> AppResult<Json<Value>> {
    let account = accounts
        .create(
            name.as_deref().unwrap_or_default(),
            email.as_deref().unwrap_or_default(),
            password.as_deref().unwrap_or_default(),
            Role::Member,
        )
        .await?;

    info!(id = account.id, email = %account.email, by = admin.account_id, "account created");
    success_with("account", account)
}

#[debug_handler(state = AppState)]
pub(crate) async fn set_active(
    Admin(admin): Admin,
    State(accounts): State<AccountStore>,
    Param(id): Param<i64>,
    Payload(ActiveToggle { active }): Payload<ActiveToggle>,
) -> AppResult<Json<Value>> {
    let active = active.ok_or_else(|| AppError::Rejected("active is required".to_owned()))?;
    accounts.set_active(id, active).await?;

    info!(id, active, by = admin.account_id, "account toggled");
    Ok(success())
}
