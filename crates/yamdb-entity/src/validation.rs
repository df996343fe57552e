//! Field rules shared by the input shapes.
//!
//! Length and format rules are declared with `validator` derives on each
//! input struct; the rules below cannot be expressed that way and are
//! merged into the same per-field error map.

use validator::ValidationErrors;

use yamdb_core::error::{AppError, FieldErrors};
use yamdb_core::result::AppResult;

/// Message for a required field that is missing or blank.
pub const REQUIRED: &str = "Обязательное поле.";

/// Message for a username already held by another identity.
pub const USERNAME_TAKEN: &str = "Пользователь с таким username уже существует.";

/// Message for an email already held by another identity.
pub const EMAIL_TAKEN: &str = "Пользователь с таким email уже существует.";

/// Message for a second review of one title by the same author.
pub const DUPLICATE_REVIEW: &str = "Вы уже оставили отзыв на этот обзор.";

/// Reserved username that would collide with the self-service profile path.
pub const RESERVED_USERNAME: &str = "me";

/// Minimum review score.
pub const MIN_SCORE: i32 = 1;
/// Maximum review score.
pub const MAX_SCORE: i32 = 10;

/// Append a message to a field's error list.
pub fn push(fields: &mut FieldErrors, field: &str, message: impl Into<String>) {
    fields
        .entry(field.to_string())
        .or_default()
        .push(message.into());
}

/// Combine derive-based validation with manually collected field errors.
pub fn finish(derived: Result<(), ValidationErrors>, extra: FieldErrors) -> AppResult<()> {
    let mut fields = match derived {
        Ok(()) => FieldErrors::new(),
        Err(errors) => AppError::from(errors).fields,
    };
    for (field, messages) in extra {
        fields.entry(field).or_default().extend(messages);
    }
    if fields.is_empty() {
        Ok(())
    } else {
        Err(AppError::from_fields(fields))
    }
}

/// Username rules beyond length: allowed characters and the reserved name.
pub fn check_username(username: &str, fields: &mut FieldErrors) {
    if username.trim().is_empty() {
        push(fields, "username", REQUIRED);
        return;
    }
    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
    {
        push(
            fields,
            "username",
            "Введите правильное имя пользователя. Оно может содержать только буквы, цифры и знаки @/./+/-/_.",
        );
    }
    let lowered = username.to_lowercase();
    if lowered == RESERVED_USERNAME {
        push(
            fields,
            "username",
            format!("Создание Пользователя c username \"{lowered}\" запрещено"),
        );
    }
}

/// Slug rules: non-empty, ASCII letters, digits, `-` and `_` only.
pub fn check_slug(slug: &str, fields: &mut FieldErrors) {
    if slug.is_empty() {
        push(fields, "slug", REQUIRED);
    } else if !slug
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        push(
            fields,
            "slug",
            "Значение должно состоять только из латинских букв, цифр, знаков подчеркивания или дефиса.",
        );
    }
}

/// Release year must not be in the future.
pub fn check_year(year: i32, current_year: i32, fields: &mut FieldErrors) {
    if year > current_year {
        push(fields, "year", "Год создания не может быть больше текущего");
    }
}

/// Review score must lie in `MIN_SCORE..=MAX_SCORE`.
pub fn check_score(score: i32, fields: &mut FieldErrors) {
    if score < MIN_SCORE {
        push(fields, "score", "Минимальная оценка 1");
    } else if score > MAX_SCORE {
        push(fields, "score", "Максимальная оценка 10");
    }
}

/// Free text must contain something besides whitespace.
pub fn check_text(text: &str, fields: &mut FieldErrors) {
    if text.trim().is_empty() {
        push(fields, "text", REQUIRED);
    }
}

/// Emails are compared and stored in lowercase.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
