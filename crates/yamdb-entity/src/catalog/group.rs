//! Categories and genres share one shape: a display name and a unique slug.

use serde::{Deserialize, Serialize};
use validator::Validate;

use yamdb_core::error::FieldErrors;
use yamdb_core::result::AppResult;

use crate::validation;

/// A category a title belongs to (film, book, music, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Display name.
    pub name: String,
    /// Unique identifier used in paths and filters.
    pub slug: String,
}

/// A genre a title may be tagged with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    /// Display name.
    pub name: String,
    /// Unique identifier used in paths and filters.
    pub slug: String,
}

/// Creation input for either a category or a genre.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct NewGroup {
    /// Display name.
    #[serde(default)]
    #[validate(length(min = 1, max = 256, message = "Длина названия должна быть от 1 до 256 символов."))]
    pub name: String,
    /// Slug.
    #[serde(default)]
    #[validate(length(max = 50, message = "Убедитесь, что это значение содержит не более 50 символов."))]
    pub slug: String,
}

impl NewGroup {
    /// Create an input from a name and slug.
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slug: slug.into(),
        }
    }

    /// Validate all fields, collecting every failure.
    pub fn check(&self) -> AppResult<()> {
        let mut fields = FieldErrors::new();
        validation::check_slug(&self.slug, &mut fields);
        validation::finish(self.validate(), fields)
    }
}

impl From<NewGroup> for Category {
    fn from(input: NewGroup) -> Self {
        Self {
            name: input.name,
            slug: input.slug,
        }
    }
}

impl From<NewGroup> for Genre {
    fn from(input: NewGroup) -> Self {
        Self {
            name: input.name,
            slug: input.slug,
        }
    }
}
