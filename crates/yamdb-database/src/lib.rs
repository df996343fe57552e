//! # yamdb-database
//!
//! Store contracts for every YaMDb entity and in-process implementations
//! of them. Services depend on the traits in [`repositories`] only; the
//! [`memory`] stores back development setups and the test suites, and
//! [`seed`] fills them from CSV exports.

pub mod memory;
pub mod repositories;
pub mod seed;

pub use memory::MemoryStores;
pub use seed::{LoadReport, load_directory};
pub use repositories::{
    CategoryStore, CommentStore, GenreStore, ReviewStore, TitleFilter, TitleStore, UserStore,
};
