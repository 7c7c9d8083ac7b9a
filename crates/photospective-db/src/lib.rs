//! Photospective database layer
//!
//! Postgres repositories (one per table family), the store traits the services are
//! written against, and `PgGalleryStore`, which implements those traits on top of the
//! repositories.

pub mod db;
pub mod setup;
pub mod store;

pub use db::{CategoryRepository, ImageRepository, PgGalleryStore, TagRepository, UserRepository};
pub use setup::{connect, run_migrations, setup_database};
pub use store::{GalleryStore, ImageTagStore, TagRecordStore};
