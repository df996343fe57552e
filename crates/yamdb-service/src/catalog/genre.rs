//! Genre management: public listing, admin create and delete.

use std::sync::Arc;

use tracing::info;

use yamdb_auth::{AccessPolicy, Action, ResourceKind};
use yamdb_core::error::AppError;
use yamdb_core::result::AppResult;
use yamdb_core::traits::Repository;
use yamdb_core::types::pagination::{PageRequest, PageResponse};
use yamdb_database::{GenreStore, TitleStore};
use yamdb_entity::catalog::{Genre, NewGroup};

use crate::context::RequestContext;

/// Handles genre operations.
#[derive(Debug, Clone)]
pub struct GenreService {
    /// Genre store.
    genres: Arc<dyn GenreStore>,
    /// Title store, for untagging deleted genres.
    titles: Arc<dyn TitleStore>,
    /// Access policy.
    policy: Arc<AccessPolicy>,
}

impl GenreService {
    /// Creates a new genre service.
    pub fn new(
        genres: Arc<dyn GenreStore>,
        titles: Arc<dyn TitleStore>,
        policy: Arc<AccessPolicy>,
    ) -> Self {
        Self {
            genres,
            titles,
            policy,
        }
    }

    /// Lists genres, optionally filtered by a name substring.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        search: Option<&str>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Genre>> {
        self.policy
            .require_collection(&ctx.caller, Action::List, ResourceKind::Genre)?;
        match search {
            Some(query) => self.genres.search(query, page).await,
            None => self.genres.find_all(page).await,
        }
    }

    /// Creates a genre.
    pub async fn create(&self, ctx: &RequestContext, input: NewGroup) -> AppResult<Genre> {
        self.policy
            .require_collection(&ctx.caller, Action::Create, ResourceKind::Genre)?;
        input.check()?;
        let genre = self
            .genres
            .create(Genre::from(input))
            .await
            .map_err(AppError::into_validation)?;
        info!(slug = %genre.slug, "Genre created");
        Ok(genre)
    }

    /// Deletes a genre and removes it from every title.
    pub async fn destroy(&self, ctx: &RequestContext, slug: &str) -> AppResult<()> {
        self.policy
            .require_collection(&ctx.caller, Action::Destroy, ResourceKind::Genre)?;
        let slug = slug.to_string();
        if !self.genres.delete(&slug).await? {
            return Err(AppError::not_found(format!("Genre '{slug}' not found")));
        }
        let untagged = self.titles.remove_genre(&slug).await?;
        info!(slug = %slug, untagged, "Genre deleted");
        Ok(())
    }
}
