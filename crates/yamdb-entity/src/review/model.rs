//! Review entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use yamdb_core::error::FieldErrors;
use yamdb_core::result::AppResult;

use crate::authored::Authored;
use crate::validation;

/// A scored review of a title. One per (title, author).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Store-assigned identifier.
    pub id: i64,
    /// Reviewed title.
    #[serde(skip_serializing, default)]
    pub title_id: i64,
    /// Author identity.
    #[serde(skip_serializing, default)]
    pub author_id: i64,
    /// Author's username.
    pub author: String,
    /// Review text.
    pub text: String,
    /// Score in `1..=10`.
    pub score: i32,
    /// Publication time.
    pub pub_date: DateTime<Utc>,
}

impl Authored for Review {
    fn author_id(&self) -> i64 {
        self.author_id
    }

    fn author(&self) -> &str {
        &self.author
    }
}

impl Review {
    /// Apply a partial update. Author and title are immutable.
    pub fn apply(&mut self, patch: ReviewPatch) {
        if let Some(text) = patch.text {
            self.text = text;
        }
        if let Some(score) = patch.score {
            self.score = score;
        }
    }
}

/// Creation (and full replacement) input.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct NewReview {
    /// Review text.
    #[serde(default)]
    #[validate(length(max = 500, message = "Убедитесь, что это значение содержит не более 500 символов."))]
    pub text: String,
    /// Score.
    pub score: i32,
}

impl NewReview {
    /// Create an input.
    pub fn new(text: impl Into<String>, score: i32) -> Self {
        Self {
            text: text.into(),
            score,
        }
    }

    /// Validate all fields, collecting every failure.
    pub fn check(&self) -> AppResult<()> {
        let mut fields = FieldErrors::new();
        validation::check_text(&self.text, &mut fields);
        validation::check_score(self.score, &mut fields);
        validation::finish(self.validate(), fields)
    }

    /// Materialize a review on `title_id` by identity `author_id`.
    pub fn into_review(self, title_id: i64, author_id: i64, author: &str) -> Review {
        Review {
            id: 0,
            title_id,
            author_id,
            author: author.to_string(),
            text: self.text,
            score: self.score,
            pub_date: Utc::now(),
        }
    }
}

impl From<NewReview> for ReviewPatch {
    fn from(input: NewReview) -> Self {
        Self {
            text: Some(input.text),
            score: Some(input.score),
        }
    }
}

/// Partial update input.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ReviewPatch {
    /// New text.
    #[validate(length(max = 500, message = "Убедитесь, что это значение содержит не более 500 символов."))]
    pub text: Option<String>,
    /// New score.
    pub score: Option<i32>,
}

impl ReviewPatch {
    /// Validate the fields that are present.
    pub fn check(&self) -> AppResult<()> {
        let mut fields = FieldErrors::new();
        if let Some(text) = &self.text {
            validation::check_text(text, &mut fields);
        }
        if let Some(score) = self.score {
            validation::check_score(score, &mut fields);
        }
        validation::finish(self.validate(), fields)
    }
}
