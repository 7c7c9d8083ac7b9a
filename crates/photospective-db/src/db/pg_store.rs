use crate::db::{CategoryRepository, ImageRepository, TagRepository, UserRepository};
use crate::store::{GalleryStore, ImageTagStore, TagRecordStore};
use async_trait::async_trait;
use photospective_core::models::{Category, Image, Tag, TagWithCategory, User};
use photospective_core::AppError;
use sqlx::PgPool;

/// Postgres-backed implementation of the store traits
#[derive(Clone)]
pub struct PgGalleryStore {
    pub users: UserRepository,
    pub images: ImageRepository,
    pub categories: CategoryRepository,
    pub tags: TagRepository,
}

impl PgGalleryStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            images: ImageRepository::new(pool.clone()),
            categories: CategoryRepository::new(pool.clone()),
            tags: TagRepository::new(pool),
        }
    }
}

#[async_trait]
impl ImageTagStore for PgGalleryStore {
    async fn images_of_user(&self, user_id: i64) -> Result<Vec<Image>, AppError> {
        self.images.list_for_user(user_id).await
    }

    async fn find_tag(&self, tag_id: i64) -> Result<Option<Tag>, AppError> {
        self.tags.get_tag(tag_id).await
    }

    async fn images_of_user_with_tag(
        &self,
        user_id: i64,
        tag_id: i64,
    ) -> Result<Vec<Image>, AppError> {
        self.images.list_for_user_with_tag(user_id, tag_id).await
    }
}

#[async_trait]
impl TagRecordStore for PgGalleryStore {
    async fn upsert_category(&self, descriptor: &str) -> Result<Category, AppError> {
        self.categories.upsert_category(descriptor).await
    }

    async fn upsert_tag(&self, descriptor: &str, category_id: i64) -> Result<Tag, AppError> {
        self.tags.upsert_tag(descriptor, category_id).await
    }

    async fn attach_tag(&self, tag_id: i64, image_id: i64) -> Result<(), AppError> {
        self.tags.attach_tag(tag_id, image_id).await
    }
}

#[async_trait]
impl GalleryStore for PgGalleryStore {
    async fn find_user(&self, user_id: i64) -> Result<Option<User>, AppError> {
        self.users.get_user(user_id).await
    }

    async fn insert_image(&self, user_id: i64, path: &str) -> Result<Image, AppError> {
        self.images.create_image(user_id, path).await
    }

    async fn find_image(&self, image_id: i64) -> Result<Option<Image>, AppError> {
        self.images.get_image(image_id).await
    }

    async fn delete_image(&self, image_id: i64) -> Result<bool, AppError> {
        self.images.delete_image(image_id).await
    }

    async fn tags_of_image(&self, image_id: i64) -> Result<Vec<TagWithCategory>, AppError> {
        self.tags.list_for_image(image_id).await
    }

    async fn personal_categories(&self, user_id: i64) -> Result<Vec<Category>, AppError> {
        self.categories.list_for_user(user_id).await
    }

    async fn tags_of_category_for_user(
        &self,
        user_id: i64,
        category_id: i64,
    ) -> Result<Vec<Tag>, AppError> {
        self.tags.list_for_user_category(user_id, category_id).await
    }
}
