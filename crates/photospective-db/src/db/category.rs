use photospective_core::{models::Category, AppError};
use sqlx::{PgPool, Postgres};

/// Repository for tag categories (EXIF attribute names)
#[derive(Clone)]
pub struct CategoryRepository {
    pool: PgPool,
}

impl CategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get or create the category with `descriptor`
    ///
    /// The no-op update makes `RETURNING` yield the existing row on conflict.
    #[tracing::instrument(skip(self), fields(db.table = "categories", db.operation = "upsert"))]
    pub async fn upsert_category(&self, descriptor: &str) -> Result<Category, AppError> {
        let category = sqlx::query_as::<Postgres, Category>(
            r#"
            INSERT INTO categories (descriptor)
            VALUES ($1)
            ON CONFLICT (descriptor) DO UPDATE SET descriptor = EXCLUDED.descriptor
            RETURNING id, descriptor
            "#,
        )
        .bind(descriptor)
        .fetch_one(&self.pool)
        .await?;

        Ok(category)
    }

    /// Categories having at least one tag on one of the user's images
    #[tracing::instrument(skip(self), fields(db.table = "categories", db.operation = "select"))]
    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<Category>, AppError> {
        let categories = sqlx::query_as::<Postgres, Category>(
            r#"
            SELECT DISTINCT c.id, c.descriptor
            FROM categories c
            INNER JOIN tags t ON t.category_id = c.id
            INNER JOIN image_tags it ON it.tag_id = t.id
            INNER JOIN images i ON i.id = it.image_id
            WHERE i.user_id = $1
            ORDER BY c.descriptor ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }
}
