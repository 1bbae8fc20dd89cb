use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// Categories seeded into an empty database.
pub const DEFAULT_CATEGORIES: &[&str] = &["Category 1", "Category 2", "Category 3", "Category 4"];
