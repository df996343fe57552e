//! Integration tests for reviews, comments, and ratings.

mod helpers;

use http::StatusCode;

use yamdb_core::traits::Repository;
use yamdb_core::types::pagination::PageRequest;
use yamdb_auth::TokenRequest;
use yamdb_entity::review::{NewComment, NewReview, ReviewPatch};
use yamdb_entity::user::{ProfilePatch, UserRole};
use yamdb_entity::validation::DUPLICATE_REVIEW;

#[tokio::test]
async fn test_author_and_staff_edit_reviews() {
    let app = helpers::TestApp::new().await;
    let title_id = app.create_title("Сталкер").await;
    let alice = app.login_as("alice", UserRole::User).await;
    let carol = app.login_as("carol", UserRole::User).await;
    let moderator = app.login_as("mod", UserRole::Moderator).await;

    let review = app
        .app
        .reviews
        .create(&alice, title_id, NewReview::new("Шедевр", 9))
        .await
        .unwrap();
    assert_eq!(review.author, "alice");

    let patch = ReviewPatch {
        score: Some(1),
        ..Default::default()
    };
    let result = app
        .app
        .reviews
        .partial_update(&carol, title_id, review.id, patch.clone())
        .await;
    assert_eq!(helpers::status(result), StatusCode::FORBIDDEN);

    let updated = app
        .app
        .reviews
        .partial_update(&moderator, title_id, review.id, patch)
        .await
        .unwrap();
    assert_eq!(updated.score, 1);
    assert_eq!(updated.author, "alice");

    let updated = app
        .app
        .reviews
        .update(&alice, title_id, review.id, NewReview::new("Передумала", 7))
        .await
        .unwrap();
    assert_eq!(updated.text, "Передумала");

    let result = app.app.reviews.destroy(&carol, title_id, review.id).await;
    assert_eq!(helpers::status(result), StatusCode::FORBIDDEN);
    app.app
        .reviews
        .destroy(&moderator, title_id, review.id)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_one_review_per_author_and_rating() {
    let app = helpers::TestApp::new().await;
    let title_id = app.create_title("Солярис").await;
    let alice = app.login_as("alice", UserRole::User).await;
    let carol = app.login_as("carol", UserRole::User).await;

    app.app
        .reviews
        .create(&alice, title_id, NewReview::new("Отлично", 10))
        .await
        .unwrap();
    app.app
        .reviews
        .create(&carol, title_id, NewReview::new("Неплохо", 7))
        .await
        .unwrap();

    let err = app
        .app
        .reviews
        .create(&alice, title_id, NewReview::new("Ещё раз", 1))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        err.fields["non_field_errors"],
        vec![DUPLICATE_REVIEW.to_string()]
    );

    let view = app
        .app
        .titles
        .retrieve(&app.anonymous(), title_id)
        .await
        .unwrap();
    assert_eq!(view.rating, Some(8));

    let err = app
        .app
        .reviews
        .create(&app.login_as("dave", UserRole::User).await, title_id, NewReview::new("x", 11))
        .await
        .unwrap_err();
    assert!(err.fields.contains_key("score"));

    let result = app
        .app
        .reviews
        .create(&alice, title_id + 100, NewReview::new("Нет такого", 5))
        .await;
    assert_eq!(helpers::status(result), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_comments_follow_review_rules() {
    let app = helpers::TestApp::new().await;
    let title_id = app.create_title("Зеркало").await;
    let alice = app.login_as("alice", UserRole::User).await;
    let carol = app.login_as("carol", UserRole::User).await;
    let admin = app.login_as("boss", UserRole::Admin).await;

    let review = app
        .app
        .reviews
        .create(&alice, title_id, NewReview::new("Сложно", 6))
        .await
        .unwrap();
    let comment = app
        .app
        .comments
        .create(&carol, title_id, review.id, NewComment::new("Согласна"))
        .await
        .unwrap();

    let result = app
        .app
        .comments
        .update(&alice, title_id, review.id, comment.id, NewComment::new("Нет"))
        .await;
    assert_eq!(helpers::status(result), StatusCode::FORBIDDEN);

    let result = app
        .app
        .comments
        .create(&app.anonymous(), title_id, review.id, NewComment::new("Аноним"))
        .await;
    assert_eq!(helpers::status(result), StatusCode::UNAUTHORIZED);

    let page = app
        .app
        .comments
        .list(&app.anonymous(), title_id, review.id, &PageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.total_items, 1);

    app.app.titles.destroy(&admin, title_id).await.unwrap();
    assert_eq!(app.app.stores.reviews.count().await.unwrap(), 0);
    assert_eq!(app.app.stores.comments.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_reused_username_does_not_inherit_reviews() {
    let app = helpers::TestApp::new().await;
    let title_id = app.create_title("Андрей Рублёв").await;
    let pair = app.register("alice").await;
    let alice = app.bearer(&pair.access).await;
    let review = app
        .app
        .reviews
        .create(&alice, title_id, NewReview::new("Великий фильм", 10))
        .await
        .unwrap();

    let patch = ProfilePatch {
        username: Some("alice2".into()),
        ..Default::default()
    };
    app.app.profile.update_me(&alice, patch).await.unwrap();
    let result = app
        .app
        .context(Some(format!("Bearer {}", pair.access).as_str()))
        .await;
    assert_eq!(helpers::status(result), StatusCode::UNAUTHORIZED);

    let code = app.signup("alice", "mallory@evil.com").await;
    let mallory_pair = app
        .app
        .auth
        .obtain_token(TokenRequest::new("alice", code))
        .await
        .unwrap();
    let mallory = app.bearer(&mallory_pair.access).await;
    let result = app.app.reviews.destroy(&mallory, title_id, review.id).await;
    assert_eq!(helpers::status(result), StatusCode::FORBIDDEN);

    let stored = app
        .app
        .reviews
        .retrieve(&app.anonymous(), title_id, review.id)
        .await
        .unwrap();
    assert_eq!(stored.author, "alice2");

    let code = app.mailed_code("alice@x.com").await;
    let renamed_pair = app
        .app
        .auth
        .obtain_token(TokenRequest::new("alice2", code))
        .await
        .unwrap();
    let alice2 = app.bearer(&renamed_pair.access).await;
    app.app
        .reviews
        .update(&alice2, title_id, review.id, NewReview::new("Все еще великий", 9))
        .await
        .unwrap();

    let root = app.login_root().await;
    app.app.users.destroy(&root, "alice2").await.unwrap();
    let result = app
        .app
        .reviews
        .retrieve(&app.anonymous(), title_id, review.id)
        .await;
    assert_eq!(helpers::status(result), StatusCode::NOT_FOUND);
    assert!(
        app.app
            .users
            .retrieve(&root, "alice")
            .await
            .is_ok()
    );
}
