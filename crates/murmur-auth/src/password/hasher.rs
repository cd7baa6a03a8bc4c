//! Argon2id password hashing and verification.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use murmur_core::config::AuthConfig;
use murmur_core::error::AppError;

/// Handles password hashing and verification using Argon2id.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    /// Cost parameters applied to new hashes.
    params: Params,
}

impl PasswordHasher {
    /// Creates a hasher using the configured cost parameters.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        let params = Params::new(config.memory_kib, config.iterations, config.parallelism, None)
            .map_err(|e| AppError::configuration(format!("Invalid Argon2 parameters: {e}")))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hashes a plaintext password with a fresh random salt.
    pub fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

        Ok(hash.to_string())
    }

    /// Verifies a plaintext password against a stored hash.
    ///
    /// The digest comparison is constant time. Returns `Ok(false)` on a
    /// mismatch and an error only when the stored hash is unreadable.
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::internal(format!("Invalid password hash format: {e}")))?;

        match self.argon2().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::internal(format!(
                "Password verification failed: {e}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap_hasher() -> PasswordHasher {
        let config = AuthConfig {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        };
        PasswordHasher::new(&config).expect("valid params")
    }

    #[test]
    fn test_hash_then_verify() {
        let hasher = cheap_hasher();
        let hash = hasher.hash_password("hunter2hunter2").expect("hash");
        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify_password("hunter2hunter2", &hash).expect("verify"));
        assert!(!hasher.verify_password("hunter2hunter3", &hash).expect("verify"));
    }

    #[test]
    fn test_same_password_gets_distinct_salts() {
        let hasher = cheap_hasher();
        let a = hasher.hash_password("correcthorsebattery").expect("hash");
        let b = hasher.hash_password("correcthorsebattery").expect("hash");
        assert_ne!(a, b);
    }

    #[test]
    fn test_garbage_hash_is_an_error() {
        let hasher = cheap_hasher();
        assert!(hasher.verify_password("whatever", "not-a-phc-string").is_err());
    }

    #[test]
    fn test_rejects_zero_iterations() {
        let config = AuthConfig {
            memory_kib: 1024,
            iterations: 0,
            parallelism: 1,
        };
        assert!(PasswordHasher::new(&config).is_err());
    }
}
