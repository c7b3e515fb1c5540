// src/routes.rs

use axum::{
    Json, Router,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use sqlx::PgPool;
use tower_http::trace::TraceLayer;

use crate::{
    error::AppError,
    handlers::{categories, questions, quizzes},
};

/// Assembles the application router.
///
/// * Category, question and quiz routes at the root.
/// * JSON 404 for unmatched paths, JSON 405 for unsupported methods.
/// * Request tracing.
pub fn create_router(pool: PgPool) -> Router {
    Router::new()
        .route(
            "/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/categories/{category_id}/questions",
            get(categories::questions_by_category),
        )
        .route(
            "/questions",
            get(questions::list_questions).post(questions::create_or_search_questions),
        )
        .route("/questions/{id}", delete(questions::delete_question))
        .route("/quizzes", post(quizzes::play_quiz))
        .fallback(route_not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(TraceLayer::new_for_http())
        .with_state(pool)
}

async fn route_not_found() -> AppError {
    AppError::NotFound("No route matches this path".to_string())
}

async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(serde_json::json!({
            "error": 405,
            "message": "Method not allowed"
        })),
    )
}
