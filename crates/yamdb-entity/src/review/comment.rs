//! Comment entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use yamdb_core::error::FieldErrors;
use yamdb_core::result::AppResult;

use crate::authored::Authored;
use crate::validation;

/// A comment on a review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Store-assigned identifier.
    pub id: i64,
    /// Parent review.
    #[serde(skip_serializing, default)]
    pub review_id: i64,
    /// Author identity.
    #[serde(skip_serializing, default)]
    pub author_id: i64,
    /// Author's username.
    pub author: String,
    /// Comment text.
    pub text: String,
    /// Publication time.
    pub pub_date: DateTime<Utc>,
}

impl Authored for Comment {
    fn author_id(&self) -> i64 {
        self.author_id
    }

    fn author(&self) -> &str {
        &self.author
    }
}

/// Creation (and full replacement) input.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct NewComment {
    /// Comment text.
    #[serde(default)]
    #[validate(length(max = 500, message = "Убедитесь, что это значение содержит не более 500 символов."))]
    pub text: String,
}

impl NewComment {
    /// Create an input.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Validate all fields, collecting every failure.
    pub fn check(&self) -> AppResult<()> {
        let mut fields = FieldErrors::new();
        validation::check_text(&self.text, &mut fields);
        validation::finish(self.validate(), fields)
    }

    /// Materialize a comment on `review_id` by identity `author_id`.
    pub fn into_comment(self, review_id: i64, author_id: i64, author: &str) -> Comment {
        Comment {
            id: 0,
            review_id,
            author_id,
            author: author.to_string(),
            text: self.text,
            pub_date: Utc::now(),
        }
    }
}

/// Partial update input.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CommentPatch {
    /// New text.
    #[validate(length(max = 500, message = "Убедитесь, что это значение содержит не более 500 символов."))]
    pub text: Option<String>,
}

impl CommentPatch {
    /// Validate the fields that are present.
    pub fn check(&self) -> AppResult<()> {
        let mut fields = FieldErrors::new();
        if let Some(text) = &self.text {
            validation::check_text(text, &mut fields);
        }
        validation::finish(self.validate(), fields)
    }
}

impl From<NewComment> for CommentPatch {
    fn from(input: NewComment) -> Self {
        Self {
            text: Some(input.text),
        }
    }
}
