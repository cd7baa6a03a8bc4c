//! Profile screen composition.

pub mod service;

pub use service::{ProfileOverview, ProfileService};
