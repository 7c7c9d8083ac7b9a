use serde::{Deserialize, Serialize};

/// Attribute name a tag belongs to (e.g. "Make", "FocalLength")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Category {
    pub id: i64,
    pub descriptor: String,
}
