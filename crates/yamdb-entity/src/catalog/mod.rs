//! Catalog entities: categories, genres, and titles.

pub mod group;
pub mod title;

pub use group::{Category, Genre, NewGroup};
pub use title::{NewTitle, Title, TitlePatch, TitleView};
