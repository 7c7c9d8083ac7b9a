//! Application-wide constants

/// Longest side, in pixels, that uploaded images are normalized to before EXIF extraction.
pub const DEFAULT_MAX_IMAGE_DIMENSION: u32 = 800;

/// JPEG quality used when re-encoding normalized images.
pub const DEFAULT_JPEG_QUALITY: u8 = 75;

/// Maximum length (in characters) of a category or tag descriptor.
pub const MAX_DESCRIPTOR_LEN: usize = 200;

/// Directory under the media root that holds per-user uploads.
pub const UPLOADS_DIR: &str = "uploads";

/// Category name used for EXIF tags the extractor has no name for.
pub const UNKNOWN_TAG_NAME: &str = "None";
