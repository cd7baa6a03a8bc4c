//! Post authoring, the author join, search, and the feed.

pub mod query;
pub mod service;

pub use query::PostQuery;
pub use service::{ContentService, UpdateOutcome};
