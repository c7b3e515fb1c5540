// src/models/category.rs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sqlx::{PgPool, prelude::FromRow};
use validator::Validate;

/// Categories keyed by id, serialized as `{"<id>": "<type>"}`.
pub type CategoryMap = BTreeMap<i64, String>;

/// Represents the 'categories' table in the database.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: i64,

    /// Free-text label, e.g. "Science".
    /// Mapped from the column 'type' since `type` is a reserved keyword in Rust.
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub category_type: String,
}

impl Category {
    pub async fn all(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
        sqlx::query_as::<_, Category>("SELECT id, type FROM categories ORDER BY id")
            .fetch_all(pool)
            .await
    }

    /// All categories in the id -> type form used by listings.
    pub async fn map(pool: &PgPool) -> Result<CategoryMap, sqlx::Error> {
        let categories = Self::all(pool).await?;
        Ok(categories
            .into_iter()
            .map(|c| (c.id, c.category_type))
            .collect())
    }

    /// Inserts a category and returns its assigned id.
    pub async fn insert(pool: &PgPool, category_type: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("INSERT INTO categories (type) VALUES ($1) RETURNING id")
            .bind(category_type)
            .fetch_one(pool)
            .await
    }
}

/// DTO for creating a new category.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "Category type cannot be empty"))]
    pub category_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_map_serializes_with_string_keys() {
        let mut map = CategoryMap::new();
        map.insert(2, "Art".to_string());
        map.insert(1, "Science".to_string());

        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"1":"Science","2":"Art"}"#);
    }

    #[test]
    fn category_formats_as_id_and_type() {
        let category = Category {
            id: 4,
            category_type: "History".into(),
        };

        let value = serde_json::to_value(&category).unwrap();
        assert_eq!(value, serde_json::json!({"id": 4, "type": "History"}));
    }

    #[test]
    fn empty_type_fails_validation() {
        let req: CreateCategoryRequest = serde_json::from_str(r#"{"type": ""}"#).unwrap();
        assert!(req.validate().is_err());

        let req: CreateCategoryRequest = serde_json::from_str(r#"{"type": "Sports"}"#).unwrap();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn long_type_is_accepted() {
        let req = CreateCategoryRequest {
            category_type: "x".repeat(500),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn missing_type_does_not_deserialize() {
        assert!(serde_json::from_str::<CreateCategoryRequest>("{}").is_err());
    }
}
