//! Store traits
//!
//! Services depend on these traits rather than on Postgres directly, so they can be
//! exercised against an in-memory store. Every call takes the store handle explicitly;
//! nothing is looked up from ambient state.

use async_trait::async_trait;
use photospective_core::models::{Category, Image, Tag, TagWithCategory, User};
use photospective_core::AppError;

/// Read side needed to intersect tag sets
#[async_trait]
pub trait ImageTagStore: Send + Sync {
    /// All images of a user, newest first
    async fn images_of_user(&self, user_id: i64) -> Result<Vec<Image>, AppError>;

    async fn find_tag(&self, tag_id: i64) -> Result<Option<Tag>, AppError>;

    /// Images of a user carrying the tag, newest first
    async fn images_of_user_with_tag(
        &self,
        user_id: i64,
        tag_id: i64,
    ) -> Result<Vec<Image>, AppError>;
}

/// Write side used when recording extracted tags
#[async_trait]
pub trait TagRecordStore: Send + Sync {
    /// Existing category with this descriptor, or a newly created one
    async fn upsert_category(&self, descriptor: &str) -> Result<Category, AppError>;

    /// Existing tag for `(descriptor, category_id)`, or a newly created one
    async fn upsert_tag(&self, descriptor: &str, category_id: i64) -> Result<Tag, AppError>;

    /// Link a tag to an image. Linking twice is a no-op.
    async fn attach_tag(&self, tag_id: i64, image_id: i64) -> Result<(), AppError>;
}

/// Everything the gallery service needs
#[async_trait]
pub trait GalleryStore: ImageTagStore + TagRecordStore {
    async fn find_user(&self, user_id: i64) -> Result<Option<User>, AppError>;

    async fn insert_image(&self, user_id: i64, path: &str) -> Result<Image, AppError>;

    async fn find_image(&self, image_id: i64) -> Result<Option<Image>, AppError>;

    /// Returns whether a row was deleted
    async fn delete_image(&self, image_id: i64) -> Result<bool, AppError>;

    /// Tags of an image with their category names, ordered by category then value
    async fn tags_of_image(&self, image_id: i64) -> Result<Vec<TagWithCategory>, AppError>;

    /// Distinct categories with at least one tag on one of the user's images
    async fn personal_categories(&self, user_id: i64) -> Result<Vec<Category>, AppError>;

    /// Distinct tags of a category that appear on the user's images
    async fn tags_of_category_for_user(
        &self,
        user_id: i64,
        category_id: i64,
    ) -> Result<Vec<Tag>, AppError>;
}
