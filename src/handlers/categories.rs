// src/handlers/categories.rs

use axum::{Json, extract::State, response::IntoResponse};
use sqlx::PgPool;
use validator::Validate;

use crate::{
    error::AppError,
    models::{
        category::{Category, CreateCategoryRequest},
        question::{Question, QuestionList},
    },
    utils::extract::{AppJson, AppPath},
};

/// Lists every category as an id -> type mapping.
pub async fn list_categories(State(pool): State<PgPool>) -> Result<impl IntoResponse, AppError> {
    let categories = Category::map(&pool).await.map_err(|e| {
        tracing::error!("Failed to list categories: {:?}", e);
        AppError::from(e)
    })?;

    Ok(Json(serde_json::json!({ "categories": categories })))
}

/// Creates a category and returns its id.
///
/// Store failures are reported as 400, like every other write failure.
pub async fn create_category(
    State(pool): State<PgPool>,
    AppJson(payload): AppJson<CreateCategoryRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let id = Category::insert(&pool, &payload.category_type)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create category: {:?}", e);
            AppError::BadRequest("Could not create category".to_string())
        })?;

    tracing::info!(id, category_type = %payload.category_type, "Category created");

    Ok(Json(serde_json::json!({
        "added": id,
        "success": true
    })))
}

/// Lists the questions of one category.
///
/// An unknown category is not an error: it simply has no questions.
pub async fn questions_by_category(
    State(pool): State<PgPool>,
    AppPath(category_id): AppPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let questions = Question::by_category(&pool, category_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch questions for category {}: {:?}", category_id, e);
            AppError::from(e)
        })?;

    Ok(Json(QuestionList::from(questions)))
}
