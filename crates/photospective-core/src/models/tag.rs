use serde::{Deserialize, Serialize};

/// A single extracted attribute value scoped to a category.
///
/// `(descriptor, category_id)` is unique.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Tag {
    pub id: i64,
    pub descriptor: String,
    pub category_id: i64,
}

/// Tag joined with the descriptor of its category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct TagWithCategory {
    pub id: i64,
    pub descriptor: String,
    pub category_id: i64,
    pub category: String,
}

impl std::fmt::Display for TagWithCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} : {}", self.category, self.descriptor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_with_category_display() {
        let tag = TagWithCategory {
            id: 4,
            descriptor: "Canon".to_string(),
            category_id: 2,
            category: "Make".to_string(),
        };
        assert_eq!(tag.to_string(), "Make : Canon");
    }
}
