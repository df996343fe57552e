//! Title operations and the read representation with rating.

use std::sync::Arc;

use chrono::{Datelike, Utc};
use tracing::info;

use yamdb_auth::{AccessPolicy, Action, ResourceKind};
use yamdb_core::error::{AppError, FieldErrors};
use yamdb_core::result::AppResult;
use yamdb_core::traits::Repository;
use yamdb_core::types::pagination::{PageRequest, PageResponse};
use yamdb_database::{CategoryStore, CommentStore, GenreStore, ReviewStore, TitleFilter, TitleStore};
use yamdb_entity::catalog::{NewTitle, Title, TitlePatch, TitleView};
use yamdb_entity::validation;

use crate::context::RequestContext;

/// Handles title operations.
#[derive(Debug, Clone)]
pub struct TitleService {
    /// Title store.
    titles: Arc<dyn TitleStore>,
    /// Category store, for resolving and checking relations.
    categories: Arc<dyn CategoryStore>,
    /// Genre store, for resolving and checking relations.
    genres: Arc<dyn GenreStore>,
    /// Review store, for ratings and cascading deletes.
    reviews: Arc<dyn ReviewStore>,
    /// Comment store, for cascading deletes.
    comments: Arc<dyn CommentStore>,
    /// Access policy.
    policy: Arc<AccessPolicy>,
}

impl TitleService {
    /// Creates a new title service.
    pub fn new(
        titles: Arc<dyn TitleStore>,
        categories: Arc<dyn CategoryStore>,
        genres: Arc<dyn GenreStore>,
        reviews: Arc<dyn ReviewStore>,
        comments: Arc<dyn CommentStore>,
        policy: Arc<AccessPolicy>,
    ) -> Self {
        Self {
            titles,
            categories,
            genres,
            reviews,
            comments,
            policy,
        }
    }

    /// Lists titles matching the filter, ordered by name.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        filter: &TitleFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<TitleView>> {
        self.policy
            .require_collection(&ctx.caller, Action::List, ResourceKind::Title)?;
        let titles = self.titles.filter(filter, page).await?;
        let mut views = Vec::with_capacity(titles.items.len());
        for title in titles.items {
            views.push(self.view(title).await?);
        }
        Ok(PageResponse::new(
            views,
            titles.page,
            titles.page_size,
            titles.total_items,
        ))
    }

    /// Gets a single title.
    pub async fn retrieve(&self, ctx: &RequestContext, id: i64) -> AppResult<TitleView> {
        self.policy
            .require_collection(&ctx.caller, Action::Retrieve, ResourceKind::Title)?;
        let title = self.load(id).await?;
        self.view(title).await
    }

    /// Creates a title.
    pub async fn create(&self, ctx: &RequestContext, input: NewTitle) -> AppResult<TitleView> {
        self.policy
            .require_collection(&ctx.caller, Action::Create, ResourceKind::Title)?;
        input.check(current_year())?;
        self.check_relations(input.category.as_deref(), Some(&input.genre))
            .await?;
        let title = self.titles.create(input.into_title()).await?;
        info!(title_id = title.id, name = %title.name, "Title created");
        self.view(title).await
    }

    /// Replaces every field of a title.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: i64,
        input: NewTitle,
    ) -> AppResult<TitleView> {
        self.policy
            .require_collection(&ctx.caller, Action::Update, ResourceKind::Title)?;
        let existing = self.load(id).await?;
        input.check(current_year())?;
        self.check_relations(input.category.as_deref(), Some(&input.genre))
            .await?;
        let mut title = input.into_title();
        title.id = existing.id;
        let title = self.titles.update(title).await?;
        info!(title_id = title.id, "Title updated");
        self.view(title).await
    }

    /// Changes the fields present in the patch.
    pub async fn partial_update(
        &self,
        ctx: &RequestContext,
        id: i64,
        patch: TitlePatch,
    ) -> AppResult<TitleView> {
        self.policy
            .require_collection(&ctx.caller, Action::PartialUpdate, ResourceKind::Title)?;
        let mut title = self.load(id).await?;
        patch.check(current_year())?;
        self.check_relations(patch.category.as_deref(), patch.genre.as_ref())
            .await?;
        title.apply(patch);
        let title = self.titles.update(title).await?;
        info!(title_id = title.id, "Title patched");
        self.view(title).await
    }

    /// Deletes a title with its reviews and their comments.
    pub async fn destroy(&self, ctx: &RequestContext, id: i64) -> AppResult<()> {
        self.policy
            .require_collection(&ctx.caller, Action::Destroy, ResourceKind::Title)?;
        let title = self.load(id).await?;
        let review_ids = self.reviews.delete_by_title(title.id).await?;
        let comments = self.comments.delete_by_reviews(&review_ids).await?;
        self.titles.delete(&title.id).await?;
        info!(
            title_id = title.id,
            reviews = review_ids.len(),
            comments,
            "Title deleted"
        );
        Ok(())
    }

    async fn load(&self, id: i64) -> AppResult<Title> {
        self.titles
            .find_by_id(&id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Title {id} not found")))
    }

    /// Referenced category and genres must exist.
    async fn check_relations(
        &self,
        category: Option<&str>,
        genres: Option<&Vec<String>>,
    ) -> AppResult<()> {
        let mut fields = FieldErrors::new();
        if let Some(slug) = category {
            if self.categories.find_by_id(&slug.to_string()).await?.is_none() {
                validation::push(&mut fields, "category", missing_slug(slug));
            }
        }
        for slug in genres.into_iter().flatten() {
            if self.genres.find_by_id(slug).await?.is_none() {
                validation::push(&mut fields, "genre", missing_slug(slug));
            }
        }
        if fields.is_empty() {
            Ok(())
        } else {
            Err(AppError::from_fields(fields))
        }
    }

    async fn view(&self, title: Title) -> AppResult<TitleView> {
        let category = match &title.category {
            Some(slug) => self.categories.find_by_id(slug).await?,
            None => None,
        };
        let mut genre = Vec::with_capacity(title.genres.len());
        for slug in &title.genres {
            if let Some(found) = self.genres.find_by_id(slug).await? {
                genre.push(found);
            }
        }
        let scores = self.reviews.scores_for_title(title.id).await?;
        Ok(TitleView {
            id: title.id,
            name: title.name,
            year: title.year,
            rating: rating(&scores),
            description: title.description,
            genre,
            category,
        })
    }
}

/// Truncated mean of the scores, or `None` without any.
pub fn rating(scores: &[i32]) -> Option<i32> {
    if scores.is_empty() {
        return None;
    }
    let sum: i64 = scores.iter().map(|&s| i64::from(s)).sum();
    Some((sum / scores.len() as i64) as i32)
}

fn current_year() -> i32 {
    Utc::now().year()
}

fn missing_slug(slug: &str) -> String {
    format!("Объект с slug={slug} не существует.")
}
