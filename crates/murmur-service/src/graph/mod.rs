//! The directed follow graph between users.

pub mod service;

pub use service::GraphService;
