//! In-process store implementing every store port.

mod search;
mod store;

pub use store::MemoryStore;
