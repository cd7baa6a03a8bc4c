//! Follow edge entities.

pub mod model;

pub use model::Follow;
