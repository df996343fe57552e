//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use http::StatusCode;

use yamdb::App;
use yamdb_auth::{TokenPair, TokenRequest};
use yamdb_core::config::{AppConfig, AuthConfig, DataConfig, SuperuserSeed};
use yamdb_core::error::AppError;
use yamdb_core::traits::Repository;
use yamdb_database::UserStore;
use yamdb_entity::catalog::{NewGroup, NewTitle};
use yamdb_entity::user::{SignupRequest, UserRole};
use yamdb_mail::MemoryMailer;
use yamdb_service::RequestContext;

/// Test application context
pub struct TestApp {
    /// The wired application
    pub app: App,
    /// Outbox of every mail the app sent
    pub outbox: MemoryMailer,
}

impl TestApp {
    /// Create a new test application with one superuser, `root`
    pub async fn new() -> Self {
        Self::with_data(DataConfig::default()).await
    }

    /// Same as [`TestApp::new`], loading seed data first
    pub async fn with_data(data: DataConfig) -> Self {
        let config = AppConfig {
            auth: AuthConfig {
                jwt_secret: "integration-secret".into(),
                superusers: vec![SuperuserSeed {
                    username: "root".into(),
                    email: "root@yamdb.local".into(),
                }],
                ..Default::default()
            },
            data,
            ..Default::default()
        };
        let outbox = MemoryMailer::new();
        let app = App::with_mailer(&config, Arc::new(outbox.clone()))
            .await
            .expect("Failed to build app");
        Self { app, outbox }
    }

    /// Sign up and return the code that was mailed out
    pub async fn signup(&self, username: &str, email: &str) -> String {
        self.app
            .auth
            .signup(SignupRequest::new(username, email))
            .await
            .expect("Signup failed");
        self.mailed_code(email).await
    }

    /// Code contained in the last mail to `email`
    pub async fn mailed_code(&self, email: &str) -> String {
        let message = self
            .outbox
            .last_to(email)
            .await
            .expect("No mail was sent");
        message
            .body
            .rsplit(' ')
            .next()
            .expect("Empty mail body")
            .to_string()
    }

    /// Sign up, exchange the code, and return the token pair
    pub async fn register(&self, username: &str) -> TokenPair {
        let code = self
            .signup(username, &format!("{username}@x.com"))
            .await;
        self.app
            .auth
            .obtain_token(TokenRequest::new(username, code))
            .await
            .expect("Token exchange failed")
    }

    /// Register a user with the given role and return its request context
    pub async fn login_as(&self, username: &str, role: UserRole) -> RequestContext {
        let pair = self.register(username).await;
        if role != UserRole::User {
            let mut user = self
                .app
                .stores
                .users
                .find_by_username(username)
                .await
                .unwrap()
                .unwrap();
            user.role = role;
            self.app.stores.users.update(user).await.unwrap();
        }
        self.bearer(&pair.access).await
    }

    /// Context for the provisioned superuser
    pub async fn login_root(&self) -> RequestContext {
        let code = self.signup("root", "root@yamdb.local").await;
        let pair = self
            .app
            .auth
            .obtain_token(TokenRequest::new("root", code))
            .await
            .unwrap();
        self.bearer(&pair.access).await
    }

    /// Resolve a bearer token the way a transport would
    pub async fn bearer(&self, access: &str) -> RequestContext {
        self.app
            .context(Some(format!("Bearer {access}").as_str()))
            .await
            .expect("Token rejected")
    }

    /// Context without credentials
    pub fn anonymous(&self) -> RequestContext {
        RequestContext::anonymous()
    }

    /// Create a title in the `movies` category as the superuser
    pub async fn create_title(&self, name: &str) -> i64 {
        let root = self.login_root().await;
        let movies = "movies".to_string();
        if self.app.stores.categories.find_by_id(&movies).await.unwrap().is_none() {
            self.app
                .categories
                .create(&root, NewGroup::new("Фильмы", "movies"))
                .await
                .expect("Failed to create category");
        }
        self.app
            .titles
            .create(
                &root,
                NewTitle {
                    name: name.into(),
                    year: 1979,
                    category: Some(movies),
                    ..Default::default()
                },
            )
            .await
            .expect("Failed to create title")
            .id
    }
}

/// HTTP status an error would be reported with
pub fn status<T: std::fmt::Debug>(result: Result<T, AppError>) -> StatusCode {
    match result {
        Ok(_) => StatusCode::OK,
        Err(e) => e.status(),
    }
}
