mod accounts;
mod resources;

use axum::{
    debug_handler,
    extract::FromRef,
    routing::{get, put},
    Json, Router,
};
use serde::{de::Error as _, Deserialize, Deserializer};
use serde_json::{json, Value};

use crate::{
    gate::Admin,
    store::{Event, Material, Resource, ResourceStore},
    AppState,
};

pub fn router() -> Router<AppState> {
    let router = Router::new()
        .route("/", get(welcome))
        .route("/accounts", get(accounts::list).post(accounts::create))
        .route("/accounts/{id}", put(accounts::set_active));

    let router = resource_routes::<Event>(router);
    resource_routes::<Material>(router)
}

fn resource_routes<R: Resource>(router: Router<AppState>) -> Router<AppState>
where
    ResourceStore<R>: FromRef<AppState>,
{
    router
        .route(R::PATH, get(resources::list::<R>).post(resources::create::<R>))
        .route(&format!("{}/{{id}}", R::PATH), put(resources::set_active::<R>))
}

#[debug_handler]
async fn welcome(Admin(user): Admin) -> Json<Value> {
    Json(json!({ "message": format!("Welcome to the admin panel, {}", user.name) }))
}

/// Body of every `PUT .../{id}`.
#[derive(Deserialize)]
pub(crate) struct ActiveToggle {
    #[serde(default, deserialize_with = "flag")]
    pub(crate) active: Option<bool>,
}

/// `true`/`false` or `1`/`0`.
fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Bool(active) => Ok(Some(active)),
        Flag::Int(0) => Ok(Some(false)),
        Flag::Int(1) => Ok(Some(true)),
        Flag::Int(other) => Err(D::Error::custom(format!("active must be 0 or 1, got {other}"))),
    }
}
