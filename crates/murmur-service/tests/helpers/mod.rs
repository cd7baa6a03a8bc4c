//! Shared test helpers for service integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use murmur_core::config::{AuthConfig, AvatarConfig};
use murmur_core::types::{PostId, UserId};
use murmur_database::MemoryStore;
use murmur_entity::user::PublicUser;
use murmur_service::{PostForm, RegistrationForm, ServiceHub};

/// Password every helper-registered account uses.
pub const PASSWORD: &str = "correct-horse-battery";

/// Services wired over a fresh in-memory store.
pub struct TestApp {
    /// The backing store, for outage simulation and direct inspection.
    pub store: MemoryStore,
    /// Every service.
    pub services: ServiceHub,
}

impl TestApp {
    /// Create a new test application with cheap hashing parameters.
    pub fn new() -> Self {
        let store = MemoryStore::new();
        let auth = AuthConfig {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        };
        let services = ServiceHub::new(
            &auth,
            &AvatarConfig::default(),
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store.clone()),
        )
        .expect("Failed to wire services");

        Self { store, services }
    }

    /// Register `username` with `{username}@example.com`.
    pub async fn register(&self, username: &str) -> PublicUser {
        self.services
            .identity
            .register(RegistrationForm::new(
                username,
                format!("{username}@example.com"),
                PASSWORD,
            ))
            .await
            .expect("Failed to register test user")
    }

    /// Publish a post and return its id.
    pub async fn publish(&self, author: UserId, title: &str, body: &str) -> PostId {
        let id = self
            .services
            .content
            .create(PostForm::new(title, body), author)
            .await
            .expect("Failed to publish test post");
        // Keep creation timestamps strictly increasing.
        tokio::time::sleep(Duration::from_millis(2)).await;
        id
    }

    /// `follower` follows `followed`.
    pub async fn follow(&self, follower: &PublicUser, followed: &PublicUser) {
        self.services
            .graph
            .follow(&followed.username, follower.id)
            .await
            .expect("Failed to follow");
    }
}
