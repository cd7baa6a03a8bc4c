//! # murmur-core
//!
//! Core crate for Murmur. Contains configuration schemas, typed
//! identifiers, and the unified error system shared by the identity,
//! graph, and content stores.
//!
//! This crate has **no** internal dependencies on other Murmur crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
