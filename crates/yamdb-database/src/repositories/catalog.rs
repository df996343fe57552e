//! Catalog store contracts.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use yamdb_core::result::AppResult;
use yamdb_core::traits::Repository;
use yamdb_core::types::pagination::{PageRequest, PageResponse};
use yamdb_entity::catalog::{Category, Genre, Title};

/// Categories keyed by slug, ordered by slug.
#[async_trait]
pub trait CategoryStore: Repository<Category, String> {
    /// Categories whose name contains `query` (case-insensitive).
    async fn search(&self, query: &str, page: &PageRequest) -> AppResult<PageResponse<Category>>;
}

/// Genres keyed by slug, ordered by slug.
#[async_trait]
pub trait GenreStore: Repository<Genre, String> {
    /// Genres whose name contains `query` (case-insensitive).
    async fn search(&self, query: &str, page: &PageRequest) -> AppResult<PageResponse<Genre>>;
}

/// Optional filters for title listings. Every present filter must match.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TitleFilter {
    /// Category slug.
    pub category: Option<String>,
    /// Genre slug.
    pub genre: Option<String>,
    /// Substring of the name (case-insensitive).
    pub name: Option<String>,
    /// Exact release year.
    pub year: Option<i32>,
}

impl TitleFilter {
    /// Whether the title satisfies every present filter.
    pub fn matches(&self, title: &Title) -> bool {
        if let Some(category) = &self.category {
            if title.category.as_deref() != Some(category.as_str()) {
                return false;
            }
        }
        if let Some(genre) = &self.genre {
            if !title.genres.iter().any(|g| g == genre) {
                return false;
            }
        }
        if let Some(name) = &self.name {
            if !title.name.to_lowercase().contains(&name.to_lowercase()) {
                return false;
            }
        }
        if let Some(year) = self.year {
            if title.year != year {
                return false;
            }
        }
        true
    }
}

/// Titles keyed by id, ordered by name.
#[async_trait]
pub trait TitleStore: Repository<Title, i64> {
    /// Titles matching the filter.
    async fn filter(
        &self,
        filter: &TitleFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Title>>;

    /// Clear the category of every title in it. Returns how many changed.
    async fn clear_category(&self, slug: &str) -> AppResult<u64>;

    /// Remove a genre from every title tagged with it. Returns how many changed.
    async fn remove_genre(&self, slug: &str) -> AppResult<u64>;
}
