mod resources;

use axum::{debug_handler, extract::FromRef, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::{
    gate::Member,
    store::{Event, Material, Resource, ResourceStore},
    AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(welcome))
        .route("/session-info", get(session_info))
        .merge(resource_routes::<Event>())
        .merge(resource_routes::<Material>())
}

/// Read-only: members only ever see active rows, without `id` or `active`.
fn resource_routes<R: Resource>() -> Router<AppState>
where
    ResourceStore<R>: FromRef<AppState>,
{
    Router::new().route(R::PATH, get(resources::listing::<R>))
}

#[debug_handler]
async fn welcome(Member(user): Member) -> Json<Value> {
    Json(json!({ "message": format!("Welcome to the member area, {}", user.name) }))
}

#[debug_handler]
async fn session_info(Member(user): Member) -> Json<Value> {
    Json(json!({ "name": user.name, "role": user.role }))
}
