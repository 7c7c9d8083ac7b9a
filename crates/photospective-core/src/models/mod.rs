//! Data models for the application
//!
//! Each sub-module holds one record type of the photo gallery together with the
//! read models built from it.

mod category;
mod image;
mod tag;
mod user;

// Re-export all models for convenient imports
pub use category::*;
pub use image::*;
pub use tag::*;
pub use user::*;
