//! Photospective image processing
//!
//! - `image`: in-place normalization of stored uploads (bounded size, JPEG, EXIF kept)
//! - `exif_tags`: EXIF extraction into human-readable attribute/value pairs
//! - `validator`: upload checks run before a file is stored

pub mod error;
pub mod exif_tags;
pub mod image;
pub mod validator;

pub use error::ProcessingError;
pub use exif_tags::{ExifTags, TagExtractor};
pub use image::ImageNormalizer;
pub use validator::{UploadValidator, ValidationError};

// Image fixtures for tests in this and downstream crates
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
