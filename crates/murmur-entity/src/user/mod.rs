//! User domain entities.

pub mod model;

pub use model::{AuthorSummary, NewUser, PublicUser, User};
