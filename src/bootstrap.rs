use tracing::{info, warn};

use crate::store::{AccountStore, Role, StoreError, StoreResult};

/// Creates the administrator account on first start. Returns whether one was created.
pub async fn seed_admin(accounts: &AccountStore, email: &str, password: &str) -> StoreResult<bool> {
    if accounts.find_by_email(email).await?.is_some() {
        info!(%email, "administrator account present");
        return Ok(false);
    }

    match accounts.create("Administrator", email, password, Role::Admin).await {
        Ok(account) => {
            warn!(%email, id = account.id, "created default administrator account, change its password");
            Ok(true)
        }
        // another instance seeded it between the lookup and the insert
        Err(StoreError::DuplicateIdentity) => Ok(false),
        Err(err) => Err(err),
    }
}
