// src/handlers/questions.rs

use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use sqlx::PgPool;

use crate::{
    error::AppError,
    models::{
        category::Category,
        question::{Question, QuestionList, QuestionPage, QuestionsAction, QuestionsRequest},
    },
    utils::{
        extract::{AppJson, AppPath},
        pagination::{PageParams, paginate},
    },
};

/// Lists questions ten at a time, along with every category.
///
/// A page with no questions is a 404, including page 1 of an empty table.
pub async fn list_questions(
    State(pool): State<PgPool>,
    Query(params): Query<PageParams>,
) -> Result<impl IntoResponse, AppError> {
    let questions = Question::all(&pool).await.map_err(|e| {
        tracing::error!("Failed to list questions: {:?}", e);
        AppError::from(e)
    })?;
    let categories = Category::map(&pool).await?;

    let page = params.page();
    let page_questions = paginate(&questions, page).to_vec();

    if page_questions.is_empty() {
        return Err(AppError::NotFound(format!("Page {} has no questions", page)));
    }

    Ok(Json(QuestionPage {
        questions: page_questions,
        total_questions: questions.len(),
        categories,
        current_category: None,
    }))
}

/// Deletes a question by ID.
///
/// * 404 if no such question exists.
/// * 422 if it exists but the store refuses to delete it.
pub async fn delete_question(
    State(pool): State<PgPool>,
    AppPath(id): AppPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    Question::find(&pool, id)
        .await?
        .ok_or(AppError::NotFound("Question not found".to_string()))?;

    let deleted = Question::delete(&pool, id).await.map_err(|e| {
        tracing::error!("Failed to delete question {}: {:?}", id, e);
        AppError::Unprocessable("Question could not be deleted".to_string())
    })?;

    if deleted == 0 {
        return Err(AppError::Unprocessable(
            "Question could not be deleted".to_string(),
        ));
    }

    tracing::info!(id, "Question deleted");

    Ok(Json(serde_json::json!({
        "deleted": id,
        "success": true
    })))
}

/// Searches questions when the body carries `searchTerm`, creates one otherwise.
///
/// Every failure on either path, store errors included, is a 400.
pub async fn create_or_search_questions(
    State(pool): State<PgPool>,
    AppJson(payload): AppJson<QuestionsRequest>,
) -> Result<Response, AppError> {
    match payload.into_action()? {
        QuestionsAction::Search(term) => {
            let questions = Question::search(&pool, &term).await.map_err(|e| {
                tracing::error!("Failed to search questions for {:?}: {:?}", term, e);
                AppError::BadRequest("Could not search questions".to_string())
            })?;

            Ok(Json(QuestionList::from(questions)).into_response())
        }
        QuestionsAction::Create(new) => {
            let id = Question::insert(&pool, &new).await.map_err(|e| {
                tracing::error!("Failed to create question: {:?}", e);
                AppError::BadRequest("Could not create question".to_string())
            })?;

            tracing::info!(id, category = new.category, "Question created");

            Ok(Json(serde_json::json!({
                "success": true,
                "added": id
            }))
            .into_response())
        }
    }
}
