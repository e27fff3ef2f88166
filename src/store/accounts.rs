use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

use super::{Hasher, StoreError, StoreResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Role {
    Member,
    Admin,
}

/// Full row, password hash included. Never serialized.
#[derive(Clone, FromRow)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub active: bool,
}

/// What the admin listing exposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct AccountView {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub active: bool,
}

#[derive(Clone)]
pub struct AccountStore {
    db_pool: SqlitePool,
    hasher: Hasher,
}

impl AccountStore {
    pub fn new(db_pool: SqlitePool, hasher: Hasher) -> Self {
        Self { db_pool, hasher }
    }

    /// Exact, case-sensitive match.
    pub async fn find_by_email(&self, email: &str) -> StoreResult<Option<Account>> {
        Ok(sqlx::query_as("SELECT id,name,email,password_hash,role,active FROM accounts WHERE email=?")
            .bind(email)
            .fetch_optional(&self.db_pool)
            .await?)
    }

    /// The role always comes from the caller's code path, never from a request body.
    pub async fn create(&self, name: &str, email: &str, password: &str, role: Role) -> StoreResult<AccountView> {
        if [name, email, password].iter().any(|value| value.trim().is_empty()) {
            return Err(StoreError::Validation("name, email and password are required".to_owned()));
        }

        let password_hash = self.hasher.hash(password).await?;

        sqlx::query_as(
            "INSERT INTO accounts (name,email,password_hash,role,active) VALUES (?,?,?,?,1)
             RETURNING id,name,email,role,active",
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .fetch_one(&self.db_pool)
        .await
        .map_err(|err| {
            if let sqlx::Error::Database(db_err) = &err {
                if db_err.is_unique_violation() {
                    return StoreError::DuplicateIdentity;
                }
            }
            StoreError::Database(err)
        })
    }

    pub async fn list(&self) -> StoreResult<Vec<AccountView>> {
        Ok(sqlx::query_as("SELECT id,name,email,role,active FROM accounts ORDER BY id")
            .fetch_all(&self.db_pool)
            .await?)
    }

    pub async fn set_active(&self, id: i64, active: bool) -> StoreResult<()> {
        let result = sqlx::query("UPDATE accounts SET active=? WHERE id=?")
            .bind(active)
            .bind(id)
            .execute(&self.db_pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    /// `None` for an unknown email, an inactive account or a wrong password alike.
    /// A miss still pays for one hash so the three cases cost the same.
    pub async fn verify_credentials(&self, email: &str, password: &str) -> StoreResult<Option<Account>> {
        let Some(account) = self.find_by_email(email).await?.filter(|account| account.active) else {
            self.hasher.hash(password).await?;
            return Ok(None);
        };

        if self.hasher.verify(password, &account.password_hash).await? {
            Ok(Some(account))
        } else {
            Ok(None)
        }
    }
}
