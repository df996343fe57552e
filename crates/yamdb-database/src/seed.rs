//! Bulk import of CSV exports into the in-memory stores.
//!
//! A seed directory holds one file per table, named as in [`SEED_FILES`].
//! Rows keep their ids, and relations between files are expressed through
//! those ids. Loading is idempotent: a row whose id (or slug) is already
//! stored is left untouched, so running the loader twice adds nothing.

use std::collections::HashMap;
use std::io;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tokio::fs;
use tracing::{debug, info, warn};

use yamdb_core::error::{AppError, ErrorKind};
use yamdb_core::result::AppResult;
use yamdb_core::traits::Repository;
use yamdb_entity::catalog::{Category, Genre, Title};
use yamdb_entity::review::{Comment, Review};
use yamdb_entity::user::{User, UserRole};

use crate::memory::MemoryStores;

/// Seed files in load order.
pub const SEED_FILES: [&str; 7] = [
    "users.csv",
    "category.csv",
    "genre.csv",
    "titles.csv",
    "genre_title.csv",
    "review.csv",
    "comments.csv",
];

/// Rows inserted per table by one load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub users: u64,
    pub categories: u64,
    pub genres: u64,
    pub titles: u64,
    /// Genre attachments added to existing titles.
    pub genre_links: u64,
    pub reviews: u64,
    pub comments: u64,
    /// Rows dropped for a dangling reference or a uniqueness clash.
    pub skipped: u64,
}

#[derive(Debug, Deserialize)]
struct UserRow {
    id: i64,
    username: String,
    email: String,
    #[serde(default)]
    role: Option<UserRole>,
    #[serde(default)]
    bio: Option<String>,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GroupRow {
    id: i64,
    name: String,
    slug: String,
}

#[derive(Debug, Deserialize)]
struct TitleRow {
    id: i64,
    name: String,
    year: i32,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    category: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct GenreTitleRow {
    title_id: i64,
    genre_id: i64,
}

#[derive(Debug, Deserialize)]
struct ReviewRow {
    id: i64,
    title_id: i64,
    text: String,
    author: i64,
    score: i32,
    #[serde(default)]
    pub_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct CommentRow {
    id: i64,
    review_id: i64,
    text: String,
    author: i64,
    #[serde(default)]
    pub_date: Option<DateTime<Utc>>,
}

/// Load every seed file found in `directory` into `stores`.
///
/// Absent files are skipped; an unreadable directory or a malformed row
/// fails the whole load with a storage error.
pub async fn load_directory(
    stores: &MemoryStores,
    directory: impl AsRef<Path>,
) -> AppResult<LoadReport> {
    let directory = directory.as_ref();
    if !fs::try_exists(directory).await? {
        return Err(AppError::storage(format!(
            "Seed directory '{}' does not exist",
            directory.display()
        )));
    }
    let mut report = LoadReport::default();

    for row in read_rows::<UserRow>(directory, SEED_FILES[0]).await? {
        let mut user = User::new(row.username, row.email);
        user.id = row.id;
        user.role = row.role.unwrap_or_default();
        user.bio = row.bio.unwrap_or_default();
        user.first_name = row.first_name.unwrap_or_default();
        user.last_name = row.last_name.unwrap_or_default();
        tally(stores.users.restore(user).await, &mut report.users, &mut report.skipped)?;
    }

    let mut category_slugs = HashMap::new();
    for row in read_rows::<GroupRow>(directory, SEED_FILES[1]).await? {
        category_slugs.insert(row.id, row.slug.clone());
        if stores.categories.find_by_id(&row.slug).await?.is_none() {
            stores
                .categories
                .create(Category {
                    name: row.name,
                    slug: row.slug,
                })
                .await?;
            report.categories += 1;
        }
    }

    let mut genre_slugs = HashMap::new();
    for row in read_rows::<GroupRow>(directory, SEED_FILES[2]).await? {
        genre_slugs.insert(row.id, row.slug.clone());
        if stores.genres.find_by_id(&row.slug).await?.is_none() {
            stores
                .genres
                .create(Genre {
                    name: row.name,
                    slug: row.slug,
                })
                .await?;
            report.genres += 1;
        }
    }

    for row in read_rows::<TitleRow>(directory, SEED_FILES[3]).await? {
        let category = match row.category {
            Some(id) => match category_slugs.get(&id) {
                Some(slug) => Some(slug.clone()),
                None => {
                    warn!(title_id = row.id, category_id = id, "Unknown category, title skipped");
                    report.skipped += 1;
                    continue;
                }
            },
            None => None,
        };
        let title = Title {
            id: row.id,
            name: row.name,
            year: row.year,
            description: row.description,
            category,
            genres: Vec::new(),
        };
        tally(stores.titles.restore(title).await, &mut report.titles, &mut report.skipped)?;
    }

    for row in read_rows::<GenreTitleRow>(directory, SEED_FILES[4]).await? {
        let title = stores.titles.find_by_id(&row.title_id).await?;
        let (Some(mut title), Some(slug)) = (title, genre_slugs.get(&row.genre_id)) else {
            warn!(title_id = row.title_id, genre_id = row.genre_id, "Dangling genre link skipped");
            report.skipped += 1;
            continue;
        };
        if !title.genres.contains(slug) {
            title.genres.push(slug.clone());
            stores.titles.update(title).await?;
            report.genre_links += 1;
        }
    }

    for row in read_rows::<ReviewRow>(directory, SEED_FILES[5]).await? {
        let author = stores.users.find_by_id(&row.author).await?;
        let title = stores.titles.find_by_id(&row.title_id).await?;
        let (Some(author), Some(_)) = (author, title) else {
            warn!(review_id = row.id, "Review with unknown title or author skipped");
            report.skipped += 1;
            continue;
        };
        let review = Review {
            id: row.id,
            title_id: row.title_id,
            author_id: author.id,
            author: author.username,
            text: row.text,
            score: row.score,
            pub_date: row.pub_date.unwrap_or_else(Utc::now),
        };
        tally(stores.reviews.restore(review).await, &mut report.reviews, &mut report.skipped)?;
    }

    for row in read_rows::<CommentRow>(directory, SEED_FILES[6]).await? {
        let author = stores.users.find_by_id(&row.author).await?;
        let review = stores.reviews.find_by_id(&row.review_id).await?;
        let (Some(author), Some(_)) = (author, review) else {
            warn!(comment_id = row.id, "Comment with unknown review or author skipped");
            report.skipped += 1;
            continue;
        };
        let comment = Comment {
            id: row.id,
            review_id: row.review_id,
            author_id: author.id,
            author: author.username,
            text: row.text,
            pub_date: row.pub_date.unwrap_or_else(Utc::now),
        };
        tally(stores.comments.restore(comment).await, &mut report.comments, &mut report.skipped)?;
    }

    info!(
        directory = %directory.display(),
        users = report.users,
        categories = report.categories,
        genres = report.genres,
        titles = report.titles,
        reviews = report.reviews,
        comments = report.comments,
        skipped = report.skipped,
        "Seed data loaded"
    );
    Ok(report)
}

/// Count an inserted row; a uniqueness clash is counted as skipped.
fn tally(result: AppResult<bool>, inserted: &mut u64, skipped: &mut u64) -> AppResult<()> {
    match result {
        Ok(true) => *inserted += 1,
        Ok(false) => {}
        Err(e) if e.kind == ErrorKind::Conflict => {
            warn!(error = %e, "Seed row clashes with stored data, skipped");
            *skipped += 1;
        }
        Err(e) => return Err(e),
    }
    Ok(())
}

async fn read_rows<T: DeserializeOwned>(directory: &Path, file: &str) -> AppResult<Vec<T>> {
    let path = directory.join(file);
    let bytes = match fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(file, "Seed file absent");
            return Ok(Vec::new());
        }
        Err(e) => {
            return Err(AppError::storage(format!(
                "Failed to read {}: {e}",
                path.display()
            )));
        }
    };
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(bytes.as_slice());
    reader
        .deserialize()
        .map(|row| row.map_err(|e| AppError::storage(format!("Malformed row in {file}: {e}"))))
        .collect()
}
