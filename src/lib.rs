pub mod admin;
pub mod auth;
pub mod bootstrap;
pub mod config;
pub mod db;
pub mod extract;
pub mod gate;
pub mod member;
pub mod session;
pub mod store;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        FromRef,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Map, Value};
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;
use tower_sessions::{MemoryStore, SessionManagerLayer};

use store::{AccountStore, Event, Hasher, Material, ResourceStore, StoreError};

/// Services shared by every handler. Built once at startup and cloned per request.
#[derive(Clone, FromRef)]
pub struct AppState {
    pub accounts: AccountStore,
    pub events: ResourceStore<Event>,
    pub materials: ResourceStore<Material>,
}

impl AppState {
    pub fn new(db_pool: SqlitePool, hasher: Hasher) -> Self {
        Self {
            accounts: AccountStore::new(db_pool.clone(), hasher),
            events: ResourceStore::new(db_pool.clone()),
            materials: ResourceStore::new(db_pool),
        }
    }
}

pub fn app(app_state: AppState, session_layer: SessionManagerLayer<MemoryStore>) -> Router {
    Router::new()
        .merge(auth::router())
        .nest("/admin", admin::router())
        .nest("/member", member::router())
        .with_state(app_state)
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
}

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A business-rule failure. Reported with a success status and `success: false`.
    #[error("{0}")]
    Rejected(String),
    #[error("not authenticated")]
    Unauthorized,
    #[error("administrator access required")]
    Forbidden,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Same message whether the email is unknown, inactive or the password is wrong.
    pub fn invalid_credentials() -> Self {
        Self::Rejected("invalid email or password".to_owned())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Rejected(_) => StatusCode::OK,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::Internal(err) => {
                tracing::error!(error = ?err, "request failed");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "success": false, "message": "internal server error" })),
                )
                    .into_response();
            }
        };

        (status, Json(json!({ "success": false, "message": self.to_string() }))).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(message) => Self::Rejected(message),
            err @ (StoreError::DuplicateIdentity | StoreError::NotFound) => Self::Rejected(err.to_string()),
            err => Self::Internal(err.into()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Rejected(format!("invalid request body: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::Rejected(format!("invalid path: {}", rejection.body_text()))
    }
}

macro_rules! apperr_impl {
    ($E:ty) => {
        impl From<$E> for AppError {
            fn from(err: $E) -> Self {
                Self::Internal(anyhow::Error::from(err))
            }
        }
    };
}

apperr_impl!(serde_json::Error);
apperr_impl!(sqlx::Error);
apperr_impl!(tower_sessions::session::Error);

pub(crate) fn success() -> Json<Value> {
    Json(json!({ "success": true }))
}

/// `{"success": true, "<key>": payload}`
pub(crate) fn success_with(key: &str, payload: impl Serialize) -> AppResult<Json<Value>> {
    let mut body = Map::new();
    body.insert("success".to_owned(), Value::Bool(true));
    body.insert(key.to_owned(), serde_json::to_value(payload)?);
    Ok(Json(Value::Object(body)))
}
