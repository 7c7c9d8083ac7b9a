//! Database repositories for data access layer
//!
//! One repository per table family. `PgGalleryStore` bundles them behind the store
//! traits.

pub mod category;
pub mod image;
pub mod pg_store;
pub mod tag;
pub mod user;

pub use category::CategoryRepository;
pub use image::ImageRepository;
pub use pg_store::PgGalleryStore;
pub use tag::TagRepository;
pub use user::UserRepository;
