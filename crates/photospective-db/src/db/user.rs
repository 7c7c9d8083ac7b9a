use photospective_core::{models::User, AppError};
use sqlx::{PgPool, Postgres};

/// Repository for image owners
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self), fields(db.table = "users", db.operation = "insert"))]
    pub async fn create_user(&self, username: &str) -> Result<User, AppError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AppError::InvalidInput("Username must not be empty".to_string()));
        }

        let result = sqlx::query_as::<Postgres, User>(
            r#"
            INSERT INTO users (username)
            VALUES ($1)
            RETURNING id, username, created_at
            "#,
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(user) => Ok(user),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Err(
                AppError::InvalidInput(format!("Username '{}' is already taken", username)),
            ),
            Err(e) => Err(e.into()),
        }
    }

    #[tracing::instrument(skip(self), fields(db.table = "users", db.operation = "select", db.record_id = %id))]
    pub async fn get_user(&self, id: i64) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<Postgres, User>(
            "SELECT id, username, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    #[tracing::instrument(skip(self), fields(db.table = "users", db.operation = "select"))]
    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<Postgres, User>(
            "SELECT id, username, created_at FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    #[tracing::instrument(skip(self), fields(db.table = "users", db.operation = "select"))]
    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<Postgres, User>(
            "SELECT id, username, created_at FROM users ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Delete a user together with their images and tag links (cascade)
    #[tracing::instrument(skip(self), fields(db.table = "users", db.operation = "delete", db.record_id = %id))]
    pub async fn delete_user(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
