//! Photospective services
//!
//! Business operations built on the store traits of `photospective-db`:
//!
//! - `recorder`: files extracted EXIF pairs as categories and tags of an image
//! - `intersector`: images of a user carrying every requested tag
//! - `gallery`: upload pipeline and owner-scoped gallery queries

pub mod gallery;
pub mod intersector;
pub mod recorder;

#[cfg(test)]
pub mod test_helpers;

pub use gallery::GalleryService;
pub use intersector::images_with_all_tags;
pub use recorder::TagRecorder;
