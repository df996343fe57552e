//! In-memory catalog stores.

use async_trait::async_trait;
use tracing::debug;

use yamdb_core::error::AppError;
use yamdb_core::result::AppResult;
use yamdb_core::traits::Repository;
use yamdb_core::types::pagination::{PageRequest, PageResponse};
use yamdb_entity::catalog::{Category, Genre, Title};

use super::table::Table;
use crate::repositories::catalog::{CategoryStore, GenreStore, TitleFilter, TitleStore};

/// Defines a slug-keyed store for a `{ name, slug }` entity.
macro_rules! define_slug_store {
    (
        $(#[$meta:meta])*
        $name:ident, $entity:ty, $store_trait:ident, $label:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Default)]
        pub struct $name {
            table: Table<String, $entity>,
        }

        impl $name {
            /// Create an empty store.
            pub fn new() -> Self {
                Self::default()
            }
        }

        #[async_trait]
        impl Repository<$entity, String> for $name {
            async fn find_by_id(&self, slug: &String) -> AppResult<Option<$entity>> {
                Ok(self.table.rows.read().await.get(slug).cloned())
            }

            async fn find_all(&self, page: &PageRequest) -> AppResult<PageResponse<$entity>> {
                let rows = self.table.rows.read().await;
                Ok(PageResponse::paginate(rows.values().cloned().collect(), page))
            }

            async fn create(&self, entity: $entity) -> AppResult<$entity> {
                let mut rows = self.table.rows.write().await;
                if rows.contains_key(&entity.slug) {
                    return Err(AppError::conflict_on(
                        "slug",
                        concat!($label, " с таким slug уже существует."),
                    ));
                }
                rows.insert(entity.slug.clone(), entity.clone());
                debug!(slug = %entity.slug, kind = $label, "Inserted catalog entry");
                Ok(entity)
            }

            async fn update(&self, entity: $entity) -> AppResult<$entity> {
                let mut rows = self.table.rows.write().await;
                match rows.get_mut(&entity.slug) {
                    Some(row) => {
                        *row = entity.clone();
                        Ok(entity)
                    }
                    None => Err(AppError::not_found(format!(
                        concat!($label, " '{}' not found"),
                        entity.slug
                    ))),
                }
            }

            async fn delete(&self, slug: &String) -> AppResult<bool> {
                Ok(self.table.rows.write().await.remove(slug).is_some())
            }

            async fn count(&self) -> AppResult<u64> {
                Ok(self.table.rows.read().await.len() as u64)
            }
        }

        #[async_trait]
        impl $store_trait for $name {
            async fn search(
                &self,
                query: &str,
                page: &PageRequest,
            ) -> AppResult<PageResponse<$entity>> {
                let query = query.to_lowercase();
                let rows = self.table.rows.read().await;
                let matched = rows
                    .values()
                    .filter(|row| row.name.to_lowercase().contains(&query))
                    .cloned()
                    .collect();
                Ok(PageResponse::paginate(matched, page))
            }
        }
    };
}

define_slug_store!(
    /// Category store keyed by slug.
    MemoryCategoryStore,
    Category,
    CategoryStore,
    "Категория"
);

define_slug_store!(
    /// Genre store keyed by slug.
    MemoryGenreStore,
    Genre,
    GenreStore,
    "Жанр"
);

/// Title store keyed by id, listed by name.
#[derive(Debug, Default)]
pub struct MemoryTitleStore {
    table: Table<i64, Title>,
}

impl MemoryTitleStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a title under its own id unless that id is already taken.
    pub async fn restore(&self, title: Title) -> AppResult<bool> {
        let mut rows = self.table.rows.write().await;
        if rows.contains_key(&title.id) {
            return Ok(false);
        }
        self.table.advance_to(title.id);
        rows.insert(title.id, title);
        Ok(true)
    }

    async fn sorted(&self, filter: &TitleFilter) -> Vec<Title> {
        let rows = self.table.rows.read().await;
        let mut titles: Vec<Title> = rows.values().filter(|t| filter.matches(t)).cloned().collect();
        titles.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        titles
    }
}

#[async_trait]
impl Repository<Title, i64> for MemoryTitleStore {
    async fn find_by_id(&self, id: &i64) -> AppResult<Option<Title>> {
        Ok(self.table.rows.read().await.get(id).cloned())
    }

    async fn find_all(&self, page: &PageRequest) -> AppResult<PageResponse<Title>> {
        let titles = self.sorted(&TitleFilter::default()).await;
        Ok(PageResponse::paginate(titles, page))
    }

    async fn create(&self, mut title: Title) -> AppResult<Title> {
        let mut rows = self.table.rows.write().await;
        title.id = self.table.next_id();
        rows.insert(title.id, title.clone());
        debug!(title_id = title.id, "Inserted title");
        Ok(title)
    }

    async fn update(&self, title: Title) -> AppResult<Title> {
        let mut rows = self.table.rows.write().await;
        match rows.get_mut(&title.id) {
            Some(row) => {
                *row = title.clone();
                Ok(title)
            }
            None => Err(AppError::not_found(format!("Title {} not found", title.id))),
        }
    }

    async fn delete(&self, id: &i64) -> AppResult<bool> {
        Ok(self.table.rows.write().await.remove(id).is_some())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.table.rows.read().await.len() as u64)
    }
}

#[async_trait]
impl TitleStore for MemoryTitleStore {
    async fn filter(
        &self,
        filter: &TitleFilter,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Title>> {
        let titles = self.sorted(filter).await;
        Ok(PageResponse::paginate(titles, page))
    }

    async fn clear_category(&self, slug: &str) -> AppResult<u64> {
        let mut rows = self.table.rows.write().await;
        let mut changed = 0;
        for title in rows.values_mut() {
            if title.category.as_deref() == Some(slug) {
                title.category = None;
                changed += 1;
            }
        }
        Ok(changed)
    }

    async fn remove_genre(&self, slug: &str) -> AppResult<u64> {
        let mut rows = self.table.rows.write().await;
        let mut changed = 0;
        for title in rows.values_mut() {
            let before = title.genres.len();
            title.genres.retain(|g| g != slug);
            if title.genres.len() != before {
                changed += 1;
            }
        }
        Ok(changed)
    }
}
