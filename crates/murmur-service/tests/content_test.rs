//! Integration tests for posts, search, and the feed.

mod helpers;

use serde_json::json;

use murmur_core::error::ErrorKind;
use murmur_core::types::UserId;
use murmur_service::{PostForm, SearchQuery, UpdateOutcome};

#[tokio::test]
async fn test_create_and_view_ownership() {
    let app = helpers::TestApp::new();
    let alice = app.register("alice").await;
    let bob = app.register("bob").await;
    let content = &app.services.content;

    let id = app.publish(alice.id, "Hello", "First post").await;
    let raw = id.to_string();

    let as_author = content.find_by_id(&raw, Some(alice.id)).await.unwrap();
    assert!(as_author.is_owner);
    assert_eq!(as_author.title, "Hello");
    assert_eq!(as_author.author.username, "alice");
    assert_eq!(as_author.author.avatar, alice.avatar);

    let as_other = content.find_by_id(&raw, Some(bob.id)).await.unwrap();
    assert!(!as_other.is_owner);

    let anonymous = content.find_by_id(&raw, None).await.unwrap();
    assert!(!anonymous.is_owner);
}

#[tokio::test]
async fn test_create_sanitizes_body() {
    let app = helpers::TestApp::new();
    let alice = app.register("alice").await;
    let content = &app.services.content;

    let id = content
        .create(
            PostForm::from_untrusted(&json!({
                "title": "  <em>Greetings</em> ",
                "body": "<script>alert(1)</script>Hello",
            })),
            alice.id,
        )
        .await
        .unwrap();

    let post = content.find_by_id(&id.to_string(), None).await.unwrap();
    assert_eq!(post.title, "Greetings");
    assert_eq!(post.body, "Hello");
}

#[tokio::test]
async fn test_create_rejects_empty_fields() {
    let app = helpers::TestApp::new();
    let alice = app.register("alice").await;
    let content = &app.services.content;

    let err = content
        .create(PostForm::new("   ", "<style>p{}</style>"), alice.id)
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(
        err.details,
        vec!["You must provide a title.", "You must provide post content."]
    );
    assert_eq!(content.count_by_author(alice.id).await.unwrap(), 0);
}

#[tokio::test]
async fn test_create_rejects_title_of_only_non_breaking_spaces() {
    let app = helpers::TestApp::new();
    let alice = app.register("alice").await;
    let content = &app.services.content;

    let err = content
        .create(PostForm::new(" &nbsp; ", "Real body"), alice.id)
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(err.details, vec!["You must provide a title."]);
    assert_eq!(content.count_by_author(alice.id).await.unwrap(), 0);
}

#[tokio::test]
async fn test_create_requires_existing_author() {
    let app = helpers::TestApp::new();

    let err = app
        .services
        .content
        .create(PostForm::new("Title", "Body"), UserId::new())
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_update_by_author() {
    let app = helpers::TestApp::new();
    let alice = app.register("alice").await;
    let content = &app.services.content;
    let id = app.publish(alice.id, "Draft", "Rough").await.to_string();

    let outcome = content
        .update(&id, PostForm::new("Final", "<b>Polished</b>"), alice.id)
        .await
        .unwrap();
    assert_eq!(outcome, UpdateOutcome::Updated);

    let post = content.find_by_id(&id, None).await.unwrap();
    assert_eq!(post.title, "Final");
    assert_eq!(post.body, "Polished");
}

#[tokio::test]
async fn test_update_by_non_author_is_forbidden() {
    let app = helpers::TestApp::new();
    let alice = app.register("alice").await;
    let mallory = app.register("mallory").await;
    let content = &app.services.content;
    let id = app.publish(alice.id, "Mine", "Hands off").await.to_string();

    let outcome = content
        .update(&id, PostForm::new("Hijacked", "Gotcha"), mallory.id)
        .await
        .unwrap();
    assert_eq!(outcome, UpdateOutcome::Forbidden);

    let post = content.find_by_id(&id, None).await.unwrap();
    assert_eq!(post.title, "Mine");
    assert_eq!(post.body, "Hands off");
}

#[tokio::test]
async fn test_update_with_invalid_values_leaves_post_unchanged() {
    let app = helpers::TestApp::new();
    let alice = app.register("alice").await;
    let content = &app.services.content;
    let id = app.publish(alice.id, "Keep", "Me").await.to_string();

    let outcome = content
        .update(&id, PostForm::new("", "New body"), alice.id)
        .await
        .unwrap();
    assert_eq!(
        outcome,
        UpdateOutcome::ValidationFailed(vec!["You must provide a title.".to_string()])
    );

    let post = content.find_by_id(&id, None).await.unwrap();
    assert_eq!(post.title, "Keep");
    assert_eq!(post.body, "Me");
}

#[tokio::test]
async fn test_bad_ids_are_not_found() {
    let app = helpers::TestApp::new();
    let alice = app.register("alice").await;
    let content = &app.services.content;
    let missing = UserId::new().to_string();

    for raw in ["not-a-uuid", "", missing.as_str()] {
        let err = content.find_by_id(raw, None).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);

        let err = content
            .update(raw, PostForm::new("T", "B"), alice.id)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);

        let err = content.delete(raw, alice.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}

#[tokio::test]
async fn test_delete() {
    let app = helpers::TestApp::new();
    let alice = app.register("alice").await;
    let bob = app.register("bob").await;
    let content = &app.services.content;
    let id = app.publish(alice.id, "Short-lived", "Bye").await.to_string();

    let err = content.delete(&id, bob.id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Forbidden);
    assert!(content.find_by_id(&id, None).await.is_ok());

    content.delete(&id, alice.id).await.unwrap();
    let err = content.find_by_id(&id, None).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
    assert_eq!(content.count_by_author(alice.id).await.unwrap(), 0);
}

#[tokio::test]
async fn test_find_by_author_newest_first() {
    let app = helpers::TestApp::new();
    let alice = app.register("alice").await;
    let bob = app.register("bob").await;
    let content = &app.services.content;

    app.publish(alice.id, "One", "a").await;
    app.publish(bob.id, "Other", "b").await;
    app.publish(alice.id, "Two", "c").await;

    let titles: Vec<String> = content
        .find_by_author(alice.id, Some(alice.id))
        .await
        .unwrap()
        .into_iter()
        .inspect(|post| assert!(post.is_owner))
        .map(|post| post.title)
        .collect();
    assert_eq!(titles, vec!["Two", "One"]);
    assert_eq!(content.count_by_author(alice.id).await.unwrap(), 2);
}

#[tokio::test]
async fn test_feed_with_no_follows_is_empty() {
    let app = helpers::TestApp::new();
    let alice = app.register("alice").await;
    let bob = app.register("bob").await;
    app.publish(bob.id, "Unseen", "nobody follows bob").await;

    assert!(app.services.content.feed(alice.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_feed_shows_followed_authors_newest_first() {
    let app = helpers::TestApp::new();
    let viewer = app.register("viewer").await;
    let a = app.register("authora").await;
    let b = app.register("authorb").await;
    let c = app.register("authorc").await;

    app.follow(&viewer, &a).await;
    app.follow(&viewer, &b).await;

    app.publish(a.id, "a1", "x").await;
    app.publish(c.id, "c1", "x").await;
    app.publish(b.id, "b1", "x").await;
    app.publish(viewer.id, "mine", "x").await;
    app.publish(a.id, "a2", "x").await;

    let feed = app.services.content.feed(viewer.id).await.unwrap();
    let titles: Vec<&str> = feed.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["a2", "b1", "a1"]);
    assert!(feed.iter().all(|p| !p.is_owner));
}

#[tokio::test]
async fn test_search() {
    let app = helpers::TestApp::new();
    let alice = app.register("alice").await;
    let content = &app.services.content;

    app.publish(alice.id, "Rust tips", "Borrowing and rust lifetimes").await;
    app.publish(alice.id, "Cooking", "A recipe with one rust mention").await;
    app.publish(alice.id, "Gardening", "Nothing relevant here").await;

    let results = content
        .search(&SearchQuery::new("rust"), None)
        .await
        .unwrap();
    let titles: Vec<&str> = results.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Rust tips", "Cooking"]);

    assert!(
        content
            .search(&SearchQuery::new("quantum"), None)
            .await
            .unwrap()
            .is_empty()
    );
    assert!(
        content
            .search(&SearchQuery::new("   "), None)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn test_search_rejects_structured_terms() {
    let err = SearchQuery::from_untrusted(&json!({"$where": "1"})).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
}
