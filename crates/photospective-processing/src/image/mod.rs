//! Image processing module
//!
//! Uploaded files are normalized in place before their metadata is read: the longest
//! side is capped, pixels are re-encoded as JPEG, and the original EXIF block is
//! carried over unchanged.

pub mod normalizer;

pub use normalizer::ImageNormalizer;
