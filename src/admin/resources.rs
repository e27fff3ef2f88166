//! One set of handlers for every [`Resource`], mounted once per type.

use axum::{extract::State, Json};
use serde_json::Value;
use tracing::info;

use super::ActiveToggle;
use crate::{
    extract::{Param, Payload},
    gate::Admin,
    store::{Filter, Resource, ResourceStore},
    success, success_with, AppError, AppResult,
};

pub(crate) async fn list<R: Resource>(_: Admin, State(store): State<ResourceStore<R>>) -> AppResult<Json<Vec<R>>> {
    Ok(Json(store.list(Filter::All).await?))
}

pub(crate) async fn create<R: Resource>(
    Admin(admin): Admin,
    State(store): State<ResourceStore<R>>,
    Payload(draft): Payload<R::Draft>,
) -> AppResult<Json<Value>> {
    let resource = store.create(draft).await?;

    info!(kind = R::KIND, by = admin.account_id, "resource created");
    success_with(R::KIND, resource)
}

pub(crate) async fn set_active<R: Resource>(
    Admin(admin): Admin,
    State(store): State<ResourceStore<R>>,
    Param(id): Param<i64>,
    Payload(ActiveToggle { active }): Payload<ActiveToggle>,
) -> AppResult<Json<Value>> {
    let active = active.ok_or_else(|| AppError::Rejected("active is required".to_owned()))?;
    store.set_active(id, active).await?;

    info!(kind = R::KIND, id, active, by = admin.account_id, "resource toggled");
    Ok(success())
}
