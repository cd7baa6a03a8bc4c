//! # murmur-database
//!
//! Store ports for the user, post, and follow collections, with two
//! implementations: PostgreSQL repositories over a shared `sqlx` pool and
//! an in-process [`MemoryStore`].

pub mod connection;
mod error;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use store::{FollowStore, PostStore, UserStore, constraint};
