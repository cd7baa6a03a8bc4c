//! Integration tests for registration, login, and identity lookups.

mod helpers;

use serde_json::json;

use murmur_core::error::ErrorKind;
use murmur_service::{LoginForm, RegistrationForm};

#[tokio::test]
async fn test_register_then_duplicate_username() {
    let app = helpers::TestApp::new();
    let identity = &app.services.identity;

    let brad = identity
        .register(RegistrationForm::new("brad", "brad@x.com", "hunter2hunter2"))
        .await
        .unwrap();
    assert_eq!(brad.username, "brad");
    assert!(brad.avatar.starts_with("https://gravatar.com/avatar/"));

    let err = identity
        .register(RegistrationForm::new("brad", "other@x.com", "hunter2hunter2"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(err.details, vec!["Username is already taken"]);
}

#[tokio::test]
async fn test_register_normalizes_case_and_whitespace() {
    let app = helpers::TestApp::new();
    let identity = &app.services.identity;

    let user = identity
        .register(RegistrationForm::new("  Brad ", " Brad@X.com ", "hunter2hunter2"))
        .await
        .unwrap();
    assert_eq!(user.username, "brad");

    assert!(identity.username_exists("BRAD").await.unwrap());
    assert!(identity.email_exists("brad@x.com").await.unwrap());

    let err = identity
        .register(RegistrationForm::new("brad2", "BRAD@x.com", "hunter2hunter2"))
        .await
        .unwrap_err();
    assert_eq!(err.details, vec!["Email is already being used"]);
}

#[tokio::test]
async fn test_register_accumulates_every_problem() {
    let app = helpers::TestApp::new();

    let err = app
        .services
        .identity
        .register(RegistrationForm::from_untrusted(&json!({
            "username": "a!",
            "email": ["brad@x.com"],
            "password": "short",
        })))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(
        err.details,
        vec![
            "Username can only contain letters and numbers.",
            "You must provide a valid email address.",
            "Password must be at least 12 characters.",
            "Username must be at least 3 characters.",
        ]
    );
}

#[tokio::test]
async fn test_uniqueness_is_only_checked_for_well_formed_fields() {
    let app = helpers::TestApp::new();
    app.register("brad").await;

    // "brad!" is malformed, so no "already taken" message joins it.
    let err = app
        .services
        .identity
        .register(RegistrationForm::new("brad!", "fresh@example.com", helpers::PASSWORD))
        .await
        .unwrap_err();
    assert_eq!(
        err.details,
        vec!["Username can only contain letters and numbers."]
    );
}

#[tokio::test]
async fn test_failed_registration_persists_nothing() {
    let app = helpers::TestApp::new();
    let identity = &app.services.identity;

    identity
        .register(RegistrationForm::new("carol", "carol@example.com", "short"))
        .await
        .unwrap_err();

    assert!(!identity.username_exists("carol").await.unwrap());
    assert!(!identity.email_exists("carol@example.com").await.unwrap());
}

#[tokio::test]
async fn test_authenticate() {
    let app = helpers::TestApp::new();
    let registered = app.register("dana").await;
    let identity = &app.services.identity;

    let user = identity
        .authenticate(LoginForm::new("Dana", helpers::PASSWORD))
        .await
        .unwrap();
    assert_eq!(user, registered);
}

#[tokio::test]
async fn test_authenticate_failures_are_indistinguishable() {
    let app = helpers::TestApp::new();
    app.register("erin").await;
    let identity = &app.services.identity;

    let wrong_password = identity
        .authenticate(LoginForm::new("erin", "not-the-password"))
        .await
        .unwrap_err();
    let unknown_user = identity
        .authenticate(LoginForm::new("nobody", helpers::PASSWORD))
        .await
        .unwrap_err();
    let structured = identity
        .authenticate(LoginForm::from_untrusted(&json!({
            "username": {"$ne": ""},
            "password": {"$ne": ""},
        })))
        .await
        .unwrap_err();

    for err in [&wrong_password, &unknown_user, &structured] {
        assert_eq!(err.kind, ErrorKind::Authentication);
        assert_eq!(err.message, "Invalid username / password.");
    }
}

#[tokio::test]
async fn test_find_public_by_username() {
    let app = helpers::TestApp::new();
    let frank = app.register("frank").await;
    let identity = &app.services.identity;

    assert_eq!(identity.find_public_by_username("frank").await.unwrap(), frank);

    let err = identity.find_public_by_username("ghost").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_store_outage_is_retryable() {
    let app = helpers::TestApp::new();
    app.register("gina").await;
    app.store.set_unavailable(true);

    let err = app
        .services
        .identity
        .authenticate(LoginForm::new("gina", helpers::PASSWORD))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::StoreUnavailable);
    assert!(err.is_retryable());

    app.store.set_unavailable(false);
    assert!(
        app.services
            .identity
            .authenticate(LoginForm::new("gina", helpers::PASSWORD))
            .await
            .is_ok()
    );
}
