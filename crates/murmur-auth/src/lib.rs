//! # murmur-auth
//!
//! Credential primitives for the Murmur identity store.
//!
//! ## Modules
//!
//! - `password`: Argon2id hashing, constant-time verification, and the
//!   registration password policy
//! - `avatar`: deterministic avatar addresses derived from email

pub mod avatar;
pub mod password;

pub use avatar::AvatarResolver;
pub use password::{PasswordHasher, PasswordPolicy};
