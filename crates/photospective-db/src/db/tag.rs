use photospective_core::{
    models::{Tag, TagWithCategory},
    AppError,
};
use sqlx::{PgPool, Postgres};

/// Repository for tags and their links to images
#[derive(Clone)]
pub struct TagRepository {
    pool: PgPool,
}

impl TagRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get or create the tag for `(descriptor, category_id)`
    #[tracing::instrument(skip(self), fields(db.table = "tags", db.operation = "upsert"))]
    pub async fn upsert_tag(&self, descriptor: &str, category_id: i64) -> Result<Tag, AppError> {
        let tag = sqlx::query_as::<Postgres, Tag>(
            r#"
            INSERT INTO tags (descriptor, category_id)
            VALUES ($1, $2)
            ON CONFLICT ON CONSTRAINT tags_descriptor_category_key
            DO UPDATE SET descriptor = EXCLUDED.descriptor
            RETURNING id, descriptor, category_id
            "#,
        )
        .bind(descriptor)
        .bind(category_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(tag)
    }

    #[tracing::instrument(skip(self), fields(db.table = "tags", db.operation = "select", db.record_id = %id))]
    pub async fn get_tag(&self, id: i64) -> Result<Option<Tag>, AppError> {
        let tag = sqlx::query_as::<Postgres, Tag>(
            "SELECT id, descriptor, category_id FROM tags WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(tag)
    }

    #[tracing::instrument(skip(self), fields(db.table = "image_tags", db.operation = "insert"))]
    pub async fn attach_tag(&self, tag_id: i64, image_id: i64) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO image_tags (tag_id, image_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(tag_id)
        .bind(image_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    #[tracing::instrument(skip(self), fields(db.table = "tags", db.operation = "select"))]
    pub async fn list_for_image(&self, image_id: i64) -> Result<Vec<TagWithCategory>, AppError> {
        let tags = sqlx::query_as::<Postgres, TagWithCategory>(
            r#"
            SELECT t.id, t.descriptor, t.category_id, c.descriptor AS category
            FROM tags t
            INNER JOIN categories c ON c.id = t.category_id
            INNER JOIN image_tags it ON it.tag_id = t.id
            WHERE it.image_id = $1
            ORDER BY c.descriptor ASC, t.descriptor ASC
            "#,
        )
        .bind(image_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tags)
    }

    /// Tags of one category that appear on the user's images
    #[tracing::instrument(skip(self), fields(db.table = "tags", db.operation = "select"))]
    pub async fn list_for_user_category(
        &self,
        user_id: i64,
        category_id: i64,
    ) -> Result<Vec<Tag>, AppError> {
        let tags = sqlx::query_as::<Postgres, Tag>(
            r#"
            SELECT DISTINCT t.id, t.descriptor, t.category_id
            FROM tags t
            INNER JOIN image_tags it ON it.tag_id = t.id
            INNER JOIN images i ON i.id = it.image_id
            WHERE i.user_id = $1 AND t.category_id = $2
            ORDER BY t.descriptor ASC
            "#,
        )
        .bind(user_id)
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tags)
    }
}
