//! Title entity: a reviewable work.

use serde::{Deserialize, Serialize};
use validator::Validate;

use yamdb_core::error::FieldErrors;
use yamdb_core::result::AppResult;

use super::group::{Category, Genre};
use crate::validation::{self, REQUIRED};

/// A stored title. Relations are kept as slugs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Title {
    /// Store-assigned identifier.
    pub id: i64,
    /// Title name.
    pub name: String,
    /// Release year.
    pub year: i32,
    /// Optional description.
    pub description: Option<String>,
    /// Category slug; cleared when the category is deleted.
    pub category: Option<String>,
    /// Genre slugs.
    pub genres: Vec<String>,
}

impl Title {
    /// Apply a partial update.
    pub fn apply(&mut self, patch: TitlePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(year) = patch.year {
            self.year = year;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(category) = patch.category {
            self.category = Some(category);
        }
        if let Some(genre) = patch.genre {
            self.genres = genre;
        }
    }
}

/// Read representation with resolved relations and the computed rating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleView {
    /// Identifier.
    pub id: i64,
    /// Title name.
    pub name: String,
    /// Release year.
    pub year: i32,
    /// Truncated mean review score, absent without reviews.
    pub rating: Option<i32>,
    /// Description.
    pub description: Option<String>,
    /// Resolved genres.
    pub genre: Vec<Genre>,
    /// Resolved category.
    pub category: Option<Category>,
}

/// Creation (and full replacement) input.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct NewTitle {
    /// Title name.
    #[serde(default)]
    #[validate(length(min = 1, max = 256, message = "Длина названия должна быть от 1 до 256 символов."))]
    pub name: String,
    /// Release year.
    pub year: i32,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Category slug. Required here even though a stored title loses it
    /// when the category is deleted.
    #[serde(default)]
    pub category: Option<String>,
    /// Genre slugs.
    #[serde(default)]
    pub genre: Vec<String>,
}

impl NewTitle {
    /// Validate field shapes against the given current year.
    ///
    /// Whether the referenced category and genres exist is checked by the
    /// service, which owns the stores.
    pub fn check(&self, current_year: i32) -> AppResult<()> {
        let mut fields = FieldErrors::new();
        validation::check_year(self.year, current_year, &mut fields);
        if self.category.as_deref().is_none_or(|slug| slug.trim().is_empty()) {
            validation::push(&mut fields, "category", REQUIRED);
        }
        validation::finish(self.validate(), fields)
    }

    /// Materialize a title record (id assigned by the store).
    pub fn into_title(self) -> Title {
        Title {
            id: 0,
            name: self.name,
            year: self.year,
            description: self.description,
            category: self.category,
            genres: self.genre,
        }
    }
}

/// Partial update input.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct TitlePatch {
    /// New name.
    #[validate(length(min = 1, max = 256, message = "Длина названия должна быть от 1 до 256 символов."))]
    pub name: Option<String>,
    /// New year.
    pub year: Option<i32>,
    /// New description.
    pub description: Option<String>,
    /// New category slug.
    pub category: Option<String>,
    /// New genre slugs.
    pub genre: Option<Vec<String>>,
}

impl TitlePatch {
    /// Validate the fields that are present.
    pub fn check(&self, current_year: i32) -> AppResult<()> {
        let mut fields = FieldErrors::new();
        if let Some(year) = self.year {
            validation::check_year(year, current_year, &mut fields);
        }
        validation::finish(self.validate(), fields)
    }
}
