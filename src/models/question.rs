// src/models/question.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::{PgPool, prelude::FromRow};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::{error::AppError, models::category::CategoryMap, utils::search::contains_pattern};

/// Represents the 'questions' table in the database.
///
/// Serializes to exactly `{id, question, answer, difficulty, category}`.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub difficulty: i32,

    /// Id of a category. Not enforced as a foreign key, so it may dangle.
    pub category: i64,
}

const COLUMNS: &str = "id, question, answer, difficulty, category";

impl Question {
    pub async fn all(pool: &PgPool) -> Result<Vec<Question>, sqlx::Error> {
        sqlx::query_as::<_, Question>(&format!("SELECT {COLUMNS} FROM questions ORDER BY id"))
            .fetch_all(pool)
            .await
    }

    pub async fn find(pool: &PgPool, id: i64) -> Result<Option<Question>, sqlx::Error> {
        sqlx::query_as::<_, Question>(&format!("SELECT {COLUMNS} FROM questions WHERE id = $1"))
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn by_category(pool: &PgPool, category: i64) -> Result<Vec<Question>, sqlx::Error> {
        sqlx::query_as::<_, Question>(&format!(
            "SELECT {COLUMNS} FROM questions WHERE category = $1 ORDER BY id"
        ))
        .bind(category)
        .fetch_all(pool)
        .await
    }

    /// Case-insensitive literal substring match on the question text.
    pub async fn search(pool: &PgPool, term: &str) -> Result<Vec<Question>, sqlx::Error> {
        sqlx::query_as::<_, Question>(&format!(
            "SELECT {COLUMNS} FROM questions WHERE question ILIKE $1 ORDER BY id"
        ))
        .bind(contains_pattern(term))
        .fetch_all(pool)
        .await
    }

    /// Inserts a question and returns its assigned id.
    pub async fn insert(pool: &PgPool, new: &NewQuestion) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            r#"
            INSERT INTO questions (question, answer, difficulty, category)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&new.question)
        .bind(&new.answer)
        .bind(new.difficulty)
        .bind(new.category)
        .fetch_one(pool)
        .await
    }

    /// Deletes by id and returns the number of rows removed.
    pub async fn delete(pool: &PgPool, id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Draws one question uniformly at random, restricted to `category` when
    /// given and never one whose id is in `excluded`.
    pub async fn random_for_quiz(
        pool: &PgPool,
        category: Option<i64>,
        excluded: &[i64],
    ) -> Result<Option<Question>, sqlx::Error> {
        sqlx::query_as::<_, Question>(&format!(
            r#"
            SELECT {COLUMNS}
            FROM questions
            WHERE ($1::BIGINT IS NULL OR category = $1)
              AND id <> ALL($2)
            ORDER BY RANDOM()
            LIMIT 1
            "#
        ))
        .bind(category)
        .bind(excluded)
        .fetch_optional(pool)
        .await
    }
}

/// A validated question ready to be persisted.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewQuestion {
    #[validate(length(min = 1, message = "Question text cannot be empty"))]
    pub question: String,
    #[validate(length(min = 1, message = "Answer cannot be empty"))]
    pub answer: String,
    pub difficulty: i32,
    pub category: i64,
}

/// Body of `POST /questions`.
///
/// The presence of `searchTerm` selects the search path; otherwise the body
/// describes a question to create. Numeric fields are kept raw so that both
/// `3` and `"3"` are accepted.
#[derive(Debug, Deserialize)]
pub struct QuestionsRequest {
    #[serde(rename = "searchTerm")]
    pub search_term: Option<String>,
    pub question: Option<String>,
    pub answer: Option<String>,
    pub difficulty: Option<Value>,
    pub category: Option<Value>,
}

/// What a `POST /questions` body asks for.
#[derive(Debug, PartialEq)]
pub enum QuestionsAction {
    Search(String),
    Create(NewQuestion),
}

impl QuestionsRequest {
    /// Splits the body into a search or a fully validated creation.
    /// Every missing or malformed field is reported, not only the first.
    pub fn into_action(self) -> Result<QuestionsAction, AppError> {
        if let Some(term) = self.search_term {
            return Ok(QuestionsAction::Search(term));
        }

        let mut errors = ValidationErrors::new();

        let question = required(&mut errors, "question", self.question);
        let answer = required(&mut errors, "answer", self.answer);
        let difficulty = required(&mut errors, "difficulty", self.difficulty)
            .and_then(|v| record(&mut errors, "difficulty", coerce_i32(&v)));
        let category = required(&mut errors, "category", self.category)
            .and_then(|v| record(&mut errors, "category", coerce_i64(&v)));

        match (question, answer, difficulty, category) {
            (Some(question), Some(answer), Some(difficulty), Some(category))
                if errors.is_empty() =>
            {
                let new = NewQuestion {
                    question,
                    answer,
                    difficulty,
                    category,
                };
                new.validate()?;
                Ok(QuestionsAction::Create(new))
            }
            _ => Err(AppError::Validation(errors)),
        }
    }
}

fn required<T>(errors: &mut ValidationErrors, field: &'static str, value: Option<T>) -> Option<T> {
    if value.is_none() {
        errors.add(field, ValidationError::new("required"));
    }
    value
}

fn record<T>(
    errors: &mut ValidationErrors,
    field: &'static str,
    result: Result<T, ValidationError>,
) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            errors.add(field, e);
            None
        }
    }
}

/// Accepts a JSON integer or a string holding one.
pub fn coerce_i64(value: &Value) -> Result<i64, ValidationError> {
    let parsed = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };

    parsed.ok_or_else(|| ValidationError::new("integer"))
}

fn coerce_i32(value: &Value) -> Result<i32, ValidationError> {
    let wide = coerce_i64(value)?;
    i32::try_from(wide).map_err(|_| ValidationError::new("integer"))
}

/// Response of `GET /questions`.
#[derive(Debug, Serialize)]
pub struct QuestionPage {
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub categories: CategoryMap,
    pub current_category: Option<i64>,
}

/// Response of search and category-filtered listings.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionList {
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub current_category: Option<i64>,
}

impl From<Vec<Question>> for QuestionList {
    fn from(questions: Vec<Question>) -> Self {
        Self {
            total_questions: questions.len(),
            questions,
            current_category: None,
        }
    }
}
