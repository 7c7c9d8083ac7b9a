//! Photospective Storage Library
//!
//! Media storage for uploaded photos.
//!
//! # Storage key format
//!
//! Keys are relative to the media root and scoped per user:
//! `uploads/user_{user_id}/{filename}`. When the name is taken, a numeric suffix is
//! inserted before the extension (`photo_1.jpg`, `photo_2.jpg`, ...).
//!
//! Keys must not contain `..` or a leading `/`.

pub(crate) mod keys;
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use local::LocalMediaStorage;
pub use traits::{MediaStorage, StorageError, StorageResult};
