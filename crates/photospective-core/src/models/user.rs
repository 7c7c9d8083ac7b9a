use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Owner of uploaded images. Credentials live with the external authentication provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub username: String,
    pub created_at: DateTime<Utc>,
}
