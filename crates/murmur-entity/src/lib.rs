//! # murmur-entity
//!
//! Domain entity models for Murmur. Every struct in this crate represents
//! a database row, an insert payload, or a read projection handed to
//! request handlers. Row entities additionally derive `sqlx::FromRow`.

pub mod follow;
pub mod post;
pub mod user;
