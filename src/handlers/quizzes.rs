// src/handlers/quizzes.rs

use axum::{Json, extract::State, response::IntoResponse};
use sqlx::PgPool;

use crate::{
    error::AppError,
    models::{
        question::Question,
        quiz::{QuizCategory, QuizRequest, QuizResponse},
    },
    utils::extract::AppJson,
};

/// Draws the next quiz question.
///
/// Picks uniformly among the questions of `quiz_category` (or of every
/// category) that are not in `previous_questions`. Returns `question: null`
/// once none are left.
pub async fn play_quiz(
    State(pool): State<PgPool>,
    AppJson(req): AppJson<QuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    let category = QuizCategory::try_from(&req.quiz_category)?;

    let question = Question::random_for_quiz(&pool, category.id(), &req.previous_questions)
        .await
        .map_err(|e| {
            tracing::error!("Failed to draw quiz question: {:?}", e);
            AppError::from(e)
        })?;

    if question.is_none() {
        tracing::debug!(?category, seen = req.previous_questions.len(), "Quiz exhausted");
    }

    Ok(Json(QuizResponse { question }))
}
