//! Deterministic avatar addresses.
//!
//! Avatars are never stored. Every read recomputes the address from the
//! normalized email, so an email change yields a new avatar with no data
//! migration.

use sha2::{Digest, Sha256};

use murmur_core::config::AvatarConfig;

/// Maps an email address to an avatar URL on the configured service.
#[derive(Debug, Clone)]
pub struct AvatarResolver {
    /// Service base URL without a trailing slash.
    base_url: String,
    /// Requested image size in pixels.
    size: u32,
}

impl AvatarResolver {
    /// Creates a resolver from configuration.
    pub fn new(config: &AvatarConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            size: config.size,
        }
    }

    /// Returns the avatar URL for `email`.
    ///
    /// The email is trimmed and lowercased before hashing, so any casing of
    /// the same address resolves to the same avatar.
    pub fn avatar_for(&self, email: &str) -> String {
        let normalized = email.trim().to_lowercase();
        let digest = hex::encode(Sha256::digest(normalized.as_bytes()));
        format!("{}/{}?s={}", self.base_url, digest, self.size)
    }
}

impl Default for AvatarResolver {
    fn default() -> Self {
        Self::new(&AvatarConfig::default())
    }
}
