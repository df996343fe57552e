//! Catalog services: categories, genres, and titles.

pub mod category;
pub mod genre;
pub mod title;

pub use category::CategoryService;
pub use genre::GenreService;
pub use title::{TitleService, rating};
