//! Persistent stores. Every mutation is a single SQL statement, so a concurrent
//! reader never sees a half-written row.

mod accounts;
mod events;
mod materials;
mod password;
mod resources;

pub use accounts::{Account, AccountStore, AccountView, Role};
pub use events::{Event, EventDraft, EventListing};
pub use materials::{Material, MaterialDraft, MaterialListing};
pub use password::Hasher;
pub use resources::{Filter, Resource, ResourceStore};

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{0}")]
    Validation(String),
    #[error("email already registered")]
    DuplicateIdentity,
    #[error("not found")]
    NotFound,
    #[error("password hashing failed: {0}")]
    Hashing(String),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Task(#[from] tokio::task::JoinError),
}

/// Blank strings count as missing.
pub(crate) fn present(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
pub(crate) async fn memory_pool() -> sqlx::SqlitePool {
    let pool = crate::db::connect("sqlite::memory:", 1).await.unwrap();
    crate::db::migrate(&pool).await.unwrap();
    pool
}
