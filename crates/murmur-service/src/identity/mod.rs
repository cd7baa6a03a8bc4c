//! Accounts: registration, authentication, and public identity lookups.

pub mod service;

pub use service::IdentityService;
