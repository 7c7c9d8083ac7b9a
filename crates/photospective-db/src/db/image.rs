use photospective_core::{models::Image, AppError};
use sqlx::{PgPool, Postgres};

/// Repository for uploaded images
#[derive(Clone)]
pub struct ImageRepository {
    pool: PgPool,
}

impl ImageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self), fields(db.table = "images", db.operation = "insert"))]
    pub async fn create_image(&self, user_id: i64, path: &str) -> Result<Image, AppError> {
        let image = sqlx::query_as::<Postgres, Image>(
            r#"
            INSERT INTO images (user_id, path)
            VALUES ($1, $2)
            RETURNING id, user_id, path, created_at
            "#,
        )
        .bind(user_id)
        .bind(path)
        .fetch_one(&self.pool)
        .await?;

        Ok(image)
    }

    #[tracing::instrument(skip(self), fields(db.table = "images", db.operation = "select", db.record_id = %id))]
    pub async fn get_image(&self, id: i64) -> Result<Option<Image>, AppError> {
        let image = sqlx::query_as::<Postgres, Image>(
            "SELECT id, user_id, path, created_at FROM images WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(image)
    }

    /// Images of a user, newest first
    #[tracing::instrument(skip(self), fields(db.table = "images", db.operation = "select"))]
    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<Image>, AppError> {
        let images = sqlx::query_as::<Postgres, Image>(
            r#"
            SELECT id, user_id, path, created_at
            FROM images
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(images)
    }

    /// Images of a user linked to `tag_id`, newest first
    #[tracing::instrument(skip(self), fields(db.table = "images", db.operation = "select"))]
    pub async fn list_for_user_with_tag(
        &self,
        user_id: i64,
        tag_id: i64,
    ) -> Result<Vec<Image>, AppError> {
        let images = sqlx::query_as::<Postgres, Image>(
            r#"
            SELECT i.id, i.user_id, i.path, i.created_at
            FROM images i
            INNER JOIN image_tags it ON it.image_id = i.id
            WHERE i.user_id = $1 AND it.tag_id = $2
            ORDER BY i.created_at DESC, i.id DESC
            "#,
        )
        .bind(user_id)
        .bind(tag_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(images)
    }

    #[tracing::instrument(skip(self), fields(db.table = "images", db.operation = "delete", db.record_id = %id))]
    pub async fn delete_image(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM images WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
