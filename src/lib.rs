//! # yamdb
//!
//! Wires the YaMDb crates together: stores, mail delivery, the access
//! policy, the auth exchange, and every resource service. A transport
//! layer holds one [`App`] and turns each request into a
//! [`RequestContext`] via [`App::context`].

pub mod telemetry;

use std::sync::Arc;

use tracing::info;

use yamdb_auth::{AccessPolicy, AuthExchange, JwtDecoder, JwtEncoder};
use yamdb_core::config::AppConfig;
use yamdb_core::result::AppResult;
use yamdb_core::traits::Mailer;
use yamdb_database::{MemoryStores, seed};
use yamdb_mail::MailManager;
use yamdb_service::{
    AdminUserService, CategoryService, CommentService, GenreService, ProfileService,
    RequestContext, ReviewService, TitleService,
};

/// Fully wired application.
#[derive(Debug, Clone)]
pub struct App {
    /// Configuration the app was built from.
    pub config: Arc<AppConfig>,
    /// Backing stores.
    pub stores: MemoryStores,
    /// Shared access policy.
    pub policy: Arc<AccessPolicy>,
    /// Signup and token exchange.
    pub auth: Arc<AuthExchange>,
    /// Categories.
    pub categories: Arc<CategoryService>,
    /// Genres.
    pub genres: Arc<GenreService>,
    /// Titles.
    pub titles: Arc<TitleService>,
    /// Reviews.
    pub reviews: Arc<ReviewService>,
    /// Comments.
    pub comments: Arc<CommentService>,
    /// User administration.
    pub users: Arc<AdminUserService>,
    /// Self-service profile.
    pub profile: Arc<ProfileService>,
}

impl App {
    /// Build the app with the mail backend named in the configuration.
    pub async fn build(config: &AppConfig) -> AppResult<Self> {
        let mailer = MailManager::new(&config.mail).await?;
        Self::with_mailer(config, Arc::new(mailer)).await
    }

    /// Build the app around an existing mail backend.
    pub async fn with_mailer(config: &AppConfig, mailer: Arc<dyn Mailer>) -> AppResult<Self> {
        info!("Starting YaMDb v{}", env!("CARGO_PKG_VERSION"));
        let stores = MemoryStores::new();
        let policy = Arc::new(AccessPolicy::new());

        info!(backend = mailer.backend_name(), "Initializing authentication system...");
        let encoder = Arc::new(JwtEncoder::new(&config.auth));
        let decoder = Arc::new(JwtDecoder::new(&config.auth));
        let auth = Arc::new(AuthExchange::new(
            stores.users.clone(),
            mailer,
            encoder,
            decoder,
            &config.mail.from_address,
        ));

        info!("Initializing services...");
        let categories = Arc::new(CategoryService::new(
            stores.categories.clone(),
            stores.titles.clone(),
            Arc::clone(&policy),
        ));
        let genres = Arc::new(GenreService::new(
            stores.genres.clone(),
            stores.titles.clone(),
            Arc::clone(&policy),
        ));
        let titles = Arc::new(TitleService::new(
            stores.titles.clone(),
            stores.categories.clone(),
            stores.genres.clone(),
            stores.reviews.clone(),
            stores.comments.clone(),
            Arc::clone(&policy),
        ));
        let reviews = Arc::new(ReviewService::new(
            stores.titles.clone(),
            stores.reviews.clone(),
            stores.comments.clone(),
            Arc::clone(&policy),
        ));
        let comments = Arc::new(CommentService::new(
            stores.titles.clone(),
            stores.reviews.clone(),
            stores.comments.clone(),
            Arc::clone(&policy),
        ));
        let users = Arc::new(AdminUserService::new(
            stores.users.clone(),
            stores.reviews.clone(),
            stores.comments.clone(),
            Arc::clone(&policy),
        ));
        let profile = Arc::new(ProfileService::new(
            stores.users.clone(),
            stores.reviews.clone(),
            stores.comments.clone(),
            Arc::clone(&policy),
        ));

        if let Some(directory) = &config.data.seed_directory {
            info!(%directory, "Loading seed data...");
            seed::load_directory(&stores, directory).await?;
        }
        for superuser in &config.auth.superusers {
            users.bootstrap_superuser(superuser).await?;
        }
        info!(
            superusers = config.auth.superusers.len(),
            "Services initialized"
        );

        Ok(Self {
            config: Arc::new(config.clone()),
            stores,
            policy,
            auth,
            categories,
            genres,
            titles,
            reviews,
            comments,
            users,
            profile,
        })
    }

    /// Resolve an `Authorization` header value into a request context.
    pub async fn context(&self, authorization: Option<&str>) -> AppResult<RequestContext> {
        let caller = self.auth.authenticate(authorization).await?;
        Ok(RequestContext::new(caller))
    }
}
