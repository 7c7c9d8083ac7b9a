use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::TagWithCategory;

/// Uploaded image owned by exactly one user.
///
/// `path` is the storage key relative to the media root, e.g. `uploads/user_3/beach.jpg`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Image {
    pub id: i64,
    pub user_id: i64,
    pub path: String,
    pub created_at: DateTime<Utc>,
}

impl Image {
    /// Final path component of the stored file
    pub fn filename(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

/// Image with its tags, as shown on the single image page
#[derive(Debug, Clone, Serialize)]
pub struct ImageProfile {
    pub image: Image,
    pub filename: String,
    pub tags: Vec<TagWithCategory>,
}

impl ImageProfile {
    pub fn new(image: Image, tags: Vec<TagWithCategory>) -> Self {
        let filename = image.filename().to_string();
        Self {
            image,
            filename,
            tags,
        }
    }
}
