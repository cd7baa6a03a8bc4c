//! Post domain entities.

pub mod model;
pub mod query;

pub use model::{NewPost, Post, PostChanges, PostView};
pub use query::{PostFilter, PostOrder};
