//! Integration tests for the signup and token exchange flow.

mod helpers;

use http::StatusCode;

use yamdb_auth::exchange::INVALID_CODE;
use yamdb_auth::{RefreshRequest, TokenRequest};
use yamdb_core::traits::Repository;
use yamdb_database::UserStore;
use yamdb_entity::user::{ProfilePatch, SignupRequest, UserRole};
use yamdb_entity::validation::RESERVED_USERNAME;

#[tokio::test]
async fn test_signup_and_token_exchange() {
    let app = helpers::TestApp::new().await;

    let receipt = app
        .app
        .auth
        .signup(SignupRequest::new("bob", "b@x.com"))
        .await
        .unwrap();
    assert_eq!(receipt.username, "bob");
    assert_eq!(receipt.email, "b@x.com");

    let stored = app
        .app
        .stores
        .users
        .find_by_username("bob")
        .await
        .unwrap()
        .unwrap();
    assert!(!stored.confirmation_code.is_empty());

    let mail = app.outbox.last_to("b@x.com").await.unwrap();
    assert!(mail.body.contains(&stored.confirmation_code));

    let pair = app
        .app
        .auth
        .obtain_token(TokenRequest::new("bob", stored.confirmation_code.clone()))
        .await
        .unwrap();
    assert!(!pair.access.is_empty());
    assert!(!pair.refresh.is_empty());
    assert_ne!(pair.access, pair.refresh);

    let err = app
        .app
        .auth
        .obtain_token(TokenRequest::new("bob", "wrong"))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    assert_eq!(err.fields["non_field_errors"], vec![INVALID_CODE.to_string()]);
}

#[tokio::test]
async fn test_signup_rejects_reserved_and_taken() {
    let app = helpers::TestApp::new().await;
    app.signup("bob", "b@x.com").await;
    let code = app.mailed_code("b@x.com").await;

    for name in ["me", "Me", "ME"] {
        let err = app
            .app
            .auth
            .signup(SignupRequest::new(name, "me@x.com"))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.fields["username"][0].contains(&format!("\"{RESERVED_USERNAME}\"")));
    }

    let err = app
        .app
        .auth
        .signup(SignupRequest::new("robert", "B@X.com"))
        .await
        .unwrap_err();
    assert!(err.fields.contains_key("email"));

    let stored = app
        .app
        .stores
        .users
        .find_by_username("bob")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.confirmation_code, code);
    assert_eq!(app.outbox.sent().await.len(), 1);
}

#[tokio::test]
async fn test_resignup_rotates_code() {
    let app = helpers::TestApp::new().await;
    let first = app.signup("bob", "b@x.com").await;
    let second = app.signup("bob", "b@x.com").await;
    assert_ne!(first, second);

    let err = app
        .app
        .auth
        .obtain_token(TokenRequest::new("bob", first))
        .await
        .unwrap_err();
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);

    // The current code can be exchanged more than once.
    for _ in 0..2 {
        app.app
            .auth
            .obtain_token(TokenRequest::new("bob", second.clone()))
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn test_unknown_user_and_missing_fields() {
    let app = helpers::TestApp::new().await;

    let result = app
        .app
        .auth
        .obtain_token(TokenRequest::new("ghost", "whatever"))
        .await;
    assert_eq!(helpers::status(result), StatusCode::NOT_FOUND);

    let err = app
        .app
        .auth
        .obtain_token(TokenRequest::default())
        .await
        .unwrap_err();
    assert!(err.fields.contains_key("username"));
    assert!(err.fields.contains_key("confirmation_code"));
}

#[tokio::test]
async fn test_delivery_failure_propagates() {
    let app = helpers::TestApp::new().await;
    app.outbox.set_failing(true);

    let result = app
        .app
        .auth
        .signup(SignupRequest::new("bob", "b@x.com"))
        .await;
    assert_eq!(helpers::status(result), StatusCode::INTERNAL_SERVER_ERROR);

    // The identity was persisted before delivery was attempted.
    assert!(
        app.app
            .stores
            .users
            .find_by_username("bob")
            .await
            .unwrap()
            .is_some()
    );
}

#[tokio::test]
async fn test_refresh_and_bearer() {
    let app = helpers::TestApp::new().await;
    let pair = app.register("bob").await;

    let access = app
        .app
        .auth
        .refresh_token(RefreshRequest {
            refresh: pair.refresh.clone(),
        })
        .await
        .unwrap();
    let ctx = app.bearer(&access.access).await;
    assert_eq!(ctx.caller.username(), Some("bob"));

    let result = app
        .app
        .auth
        .refresh_token(RefreshRequest {
            refresh: pair.access.clone(),
        })
        .await;
    assert_eq!(helpers::status(result), StatusCode::UNAUTHORIZED);

    let result = app.app.context(Some(format!("Bearer {}", pair.refresh).as_str())).await;
    assert_eq!(helpers::status(result), StatusCode::UNAUTHORIZED);

    let result = app.app.context(Some("Token abc")).await;
    assert_eq!(helpers::status(result), StatusCode::UNAUTHORIZED);

    let anonymous = app.app.context(None).await.unwrap();
    assert!(!anonymous.caller.is_authenticated());
}

#[tokio::test]
async fn test_profile_round_trip_keeps_role() {
    let app = helpers::TestApp::new().await;
    let ctx = app.login_as("bob", UserRole::User).await;

    let patch: ProfilePatch =
        serde_json::from_value(serde_json::json!({"first_name": "Боб", "role": "admin"}))
            .unwrap();
    let user = app.app.profile.update_me(&ctx, patch).await.unwrap();
    assert_eq!(user.first_name, "Боб");
    assert_eq!(user.role, UserRole::User);

    let me = app.app.profile.me(&ctx).await.unwrap();
    assert_eq!(me.username, "bob");

    let result = app.app.profile.me(&app.anonymous()).await;
    assert_eq!(helpers::status(result), StatusCode::UNAUTHORIZED);
}
