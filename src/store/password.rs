use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

use super::{StoreError, StoreResult};

/// Argon2id with a fresh random salt per hash. Work runs on the blocking pool.
#[derive(Clone, Default)]
pub struct Hasher {
    params: Params,
}

impl Hasher {
    pub fn new(params: Params) -> Self {
        Self { params }
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Never falls back to storing the plain password: any failure is an error.
    pub async fn hash(&self, password: &str) -> StoreResult<String> {
        let argon2 = self.argon2();
        let password = password.to_owned();

        tokio::task::spawn_blocking(move || {
            let mut salt_bytes = [0u8; 16];
            getrandom::getrandom(&mut salt_bytes).map_err(|e| StoreError::Hashing(e.to_string()))?;
            let salt = SaltString::encode_b64(&salt_bytes).map_err(|e| StoreError::Hashing(e.to_string()))?;

            argon2
                .hash_password(password.as_bytes(), &salt)
                .map(|phc| phc.to_string())
                .map_err(|e| StoreError::Hashing(e.to_string()))
        })
        .await?
    }

    /// An unparseable stored hash never verifies.
    pub async fn verify(&self, password: &str, phc: &str) -> StoreResult<bool> {
        let argon2 = self.argon2();
        let password = password.to_owned();
        let phc = phc.to_owned();

        let verified = tokio::task::spawn_blocking(move || match PasswordHash::new(&phc) {
            Ok(parsed) => argon2.verify_password(password.as_bytes(), &parsed).is_ok(),
            Err(_) => false,
        })
        .await?;

        Ok(verified)
    }
}

#[cfg(test)]
impl Hasher {
    pub(crate) fn fast() -> Self {
        Self::new(Params::new(1024, 1, 1, None).unwrap())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_is_salted_and_verifies() {
        let hasher = Hasher::fast();
        let first = hasher.hash("123456").await.unwrap();
        let second = hasher.hash("123456").await.unwrap();

        assert_ne!(first, second);
        assert!(!first.contains("123456"));
        assert!(first.starts_with("$argon2id$"));
        assert!(hasher.verify("123456", &first).await.unwrap());
        assert!(!hasher.verify("654321", &first).await.unwrap());
    }

    #[tokio::test]
    async fn garbage_hash_does_not_verify() {
        let hasher = Hasher::fast();
        assert!(!hasher.verify("123456", "123456").await.unwrap());
        assert!(!hasher.verify("", "").await.unwrap());
    }
}
