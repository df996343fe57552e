//! Category management: public listing, admin create and delete.

use std::sync::Arc;

use tracing::info;

use yamdb_auth::{AccessPolicy, Action, ResourceKind};
use yamdb_core::error::AppError;
use yamdb_core::result::AppResult;
use yamdb_core::traits::Repository;
use yamdb_core::types::pagination::{PageRequest, PageResponse};
use yamdb_database::{CategoryStore, TitleStore};
use yamdb_entity::catalog::{Category, NewGroup};

use crate::context::RequestContext;

/// Handles category operations.
#[derive(Debug, Clone)]
pub struct CategoryService {
    /// Category store.
    categories: Arc<dyn CategoryStore>,
    /// Title store, for clearing deleted categories.
    titles: Arc<dyn TitleStore>,
    /// Access policy.
    policy: Arc<AccessPolicy>,
}

impl CategoryService {
    /// Creates a new category service.
    pub fn new(
        categories: Arc<dyn CategoryStore>,
        titles: Arc<dyn TitleStore>,
        policy: Arc<AccessPolicy>,
    ) -> Self {
        Self {
            categories,
            titles,
            policy,
        }
    }

    /// Lists categories, optionally filtered by a name substring.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        search: Option<&str>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Category>> {
        self.policy
            .require_collection(&ctx.caller, Action::List, ResourceKind::Category)?;
        match search {
            Some(query) => self.categories.search(query, page).await,
            None => self.categories.find_all(page).await,
        }
    }

    /// Creates a category.
    pub async fn create(&self, ctx: &RequestContext, input: NewGroup) -> AppResult<Category> {
        self.policy
            .require_collection(&ctx.caller, Action::Create, ResourceKind::Category)?;
        input.check()?;
        let category = self
            .categories
            .create(Category::from(input))
            .await
            .map_err(AppError::into_validation)?;
        info!(slug = %category.slug, "Category created");
        Ok(category)
    }

    /// Deletes a category. Titles in it keep existing without a category.
    pub async fn destroy(&self, ctx: &RequestContext, slug: &str) -> AppResult<()> {
        self.policy
            .require_collection(&ctx.caller, Action::Destroy, ResourceKind::Category)?;
        let slug = slug.to_string();
        if !self.categories.delete(&slug).await? {
            return Err(AppError::not_found(format!("Category '{slug}' not found")));
        }
        let detached = self.titles.clear_category(&slug).await?;
        info!(slug = %slug, detached, "Category deleted");
        Ok(())
    }
}
