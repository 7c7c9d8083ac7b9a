//! Gallery service
//!
//! Upload pipeline (validate, store, normalize and extract, persist, record tags) and the
//! owner-scoped read operations behind the gallery views. Every operation takes the
//! requesting user's id; images of other users are reported as not found.

use crate::intersector::images_with_all_tags;
use crate::recorder::TagRecorder;
use photospective_core::models::{Category, Image, ImageProfile, Tag};
use photospective_core::{AppError, Config};
use photospective_db::GalleryStore;
use photospective_processing::{ImageNormalizer, TagExtractor, UploadValidator};
use photospective_storage::MediaStorage;
use std::sync::Arc;

#[derive(Clone)]
pub struct GalleryService {
    store: Arc<dyn GalleryStore>,
    media: Arc<dyn MediaStorage>,
    validator: UploadValidator,
    extractor: TagExtractor,
}

impl GalleryService {
    pub fn new(
        store: Arc<dyn GalleryStore>,
        media: Arc<dyn MediaStorage>,
        validator: UploadValidator,
        extractor: TagExtractor,
    ) -> Self {
        Self {
            store,
            media,
            validator,
            extractor,
        }
    }

    /// Service with validation limits and image settings taken from `config`
    pub fn from_config(
        config: &Config,
        store: Arc<dyn GalleryStore>,
        media: Arc<dyn MediaStorage>,
    ) -> Self {
        let extractor = TagExtractor::new(
            ImageNormalizer::new(config.jpeg_quality),
            config.max_image_dimension,
        );
        Self::new(store, media, UploadValidator::from_config(config), extractor)
    }

    /// Store an uploaded photo for `user_id` and tag it from its EXIF block.
    ///
    /// The stored copy is normalized in place. If any step after storing fails, the file
    /// and the image record are removed again.
    #[tracing::instrument(skip(self, data), fields(size_bytes = data.len()))]
    pub async fn upload(
        &self,
        user_id: i64,
        filename: &str,
        data: &[u8],
    ) -> Result<ImageProfile, AppError> {
        if self.store.find_user(user_id).await?.is_none() {
            return Err(AppError::NotFound(format!("User {} not found", user_id)));
        }

        self.validator.validate_all(filename, data)?;

        let key = self.media.store_upload(user_id, filename, data).await?;

        let extracted = self.extract_tags(&key).await;
        let tags = match extracted {
            Ok(tags) => tags,
            Err(e) => {
                self.discard_upload(&key, None).await;
                return Err(e);
            }
        };

        let image = match self.store.insert_image(user_id, &key).await {
            Ok(image) => image,
            Err(e) => {
                self.discard_upload(&key, None).await;
                return Err(e);
            }
        };

        if let Err(e) = TagRecorder::record(self.store.as_ref(), image.id, &tags).await {
            self.discard_upload(&key, Some(image.id)).await;
            return Err(e);
        }

        let image_tags = self.store.tags_of_image(image.id).await?;

        tracing::info!(
            image_id = image.id,
            user_id,
            key = %key,
            tag_count = image_tags.len(),
            "Upload complete"
        );

        Ok(ImageProfile::new(image, image_tags))
    }

    /// Normalize the stored file and read its tags off the async runtime
    async fn extract_tags(
        &self,
        key: &str,
    ) -> Result<photospective_processing::ExifTags, AppError> {
        let path = self.media.local_path(key)?;
        let extractor = self.extractor;

        tokio::task::spawn_blocking(move || extractor.extract(&path))
            .await
            .map_err(|e| AppError::Internal(format!("Tag extraction task failed: {}", e)))?
            .map_err(AppError::from)
    }

    /// Best-effort removal of a failed upload
    async fn discard_upload(&self, key: &str, image_id: Option<i64>) {
        if let Some(id) = image_id {
            if let Err(e) = self.store.delete_image(id).await {
                tracing::error!(error = %e, image_id = id, "Failed to remove image record");
            }
        }
        if let Err(e) = self.media.delete(key).await {
            tracing::error!(error = %e, key = %key, "Failed to remove stored upload");
        }
    }

    /// The user's images, newest first
    pub async fn list_images(&self, user_id: i64) -> Result<Vec<Image>, AppError> {
        self.store.images_of_user(user_id).await
    }

    /// An image with its tags, if it exists and belongs to `user_id`
    pub async fn image_profile(
        &self,
        user_id: i64,
        image_id: i64,
    ) -> Result<Option<ImageProfile>, AppError> {
        let image = match self.store.find_image(image_id).await? {
            Some(image) if image.user_id == user_id => image,
            _ => return Ok(None),
        };
        let tags = self.store.tags_of_image(image.id).await?;
        Ok(Some(ImageProfile::new(image, tags)))
    }

    /// Images of the user carrying every valid tag in `tokens`
    pub async fn filter_by_tags<T: AsRef<str>>(
        &self,
        user_id: i64,
        tokens: &[T],
    ) -> Result<Vec<Image>, AppError> {
        images_with_all_tags(self.store.as_ref(), user_id, tokens).await
    }

    pub async fn personal_categories(&self, user_id: i64) -> Result<Vec<Category>, AppError> {
        self.store.personal_categories(user_id).await
    }

    /// Tags of one of the user's personal categories
    pub async fn tags_of_category(
        &self,
        user_id: i64,
        category_id: i64,
    ) -> Result<Vec<Tag>, AppError> {
        let personal = self.store.personal_categories(user_id).await?;
        if !personal.iter().any(|c| c.id == category_id) {
            return Err(AppError::NotFound(format!(
                "Category {} not found",
                category_id
            )));
        }
        self.store
            .tags_of_category_for_user(user_id, category_id)
            .await
    }
}
