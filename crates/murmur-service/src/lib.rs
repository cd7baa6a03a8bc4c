//! # murmur-service
//!
//! Business logic for Murmur. The identity, graph, and content services
//! sit on top of the store ports in `murmur-database` and implement
//! registration, authentication, the follow graph, post authoring, and
//! feed assembly.
//!
//! Services follow constructor injection: every store handle is an
//! `Arc<dyn …Store>` owned by the entry point and handed in at
//! construction time. [`ServiceHub`] wires the whole set in one call.

pub mod content;
pub mod graph;
pub mod hub;
pub mod identity;
pub mod input;
pub mod profile;
pub mod sanitize;
pub mod validation;

pub use content::{ContentService, PostQuery, UpdateOutcome};
pub use graph::GraphService;
pub use hub::ServiceHub;
pub use identity::IdentityService;
pub use input::{LoginForm, PostForm, RegistrationForm, SearchQuery};
pub use profile::{ProfileOverview, ProfileService};
