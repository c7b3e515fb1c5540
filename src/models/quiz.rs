// src/models/quiz.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{error::AppError, models::question::Question};

/// Body of `POST /quizzes`. Both keys are required.
#[derive(Debug, Deserialize)]
pub struct QuizRequest {
    pub previous_questions: Vec<i64>,

    /// Category id, a `{id, ...}` object, or a falsy value for "any".
    /// Kept raw because the front-end sends several shapes.
    pub quiz_category: Value,
}

/// Category restriction of a quiz round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizCategory {
    Any,
    Only(i64),
}

impl QuizCategory {
    /// The category id to filter by, if any.
    pub fn id(self) -> Option<i64> {
        match self {
            QuizCategory::Any => None,
            QuizCategory::Only(id) => Some(id),
        }
    }
}

impl TryFrom<&Value> for QuizCategory {
    type Error = AppError;

    /// `null`, `false`, `0` and `""` mean any category.
    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        let invalid = || AppError::BadRequest("quiz_category must be a category id".to_string());

        let id = match value {
            Value::Null | Value::Bool(false) => return Ok(QuizCategory::Any),
            Value::Number(n) => n.as_i64().ok_or_else(invalid)?,
            Value::String(s) if s.trim().is_empty() => return Ok(QuizCategory::Any),
            Value::String(s) => s.trim().parse().map_err(|_| invalid())?,
            Value::Object(fields) => {
                return fields
                    .get("id")
                    .ok_or_else(invalid)
                    .and_then(QuizCategory::try_from);
            }
            _ => return Err(invalid()),
        };

        Ok(if id == 0 {
            QuizCategory::Any
        } else {
            QuizCategory::Only(id)
        })
    }
}

/// Response of `POST /quizzes`: `question` is `null` once the pool is exhausted.
#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub question: Option<Question>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn category(value: Value) -> Result<QuizCategory, AppError> {
        QuizCategory::try_from(&value)
    }

    #[test]
    fn falsy_values_mean_any() {
        for value in [json!(null), json!(false), json!(0), json!(""), json!("0")] {
            assert_eq!(category(value.clone()).unwrap(), QuizCategory::Any, "{value}");
        }
    }

    #[test]
    fn ids_restrict_the_round() {
        assert_eq!(category(json!(3)).unwrap(), QuizCategory::Only(3));
        assert_eq!(category(json!("4")).unwrap(), QuizCategory::Only(4));
    }

    #[test]
    fn front_end_object_shape_is_accepted() {
        assert_eq!(
            category(json!({"type": "Science", "id": 1})).unwrap(),
            QuizCategory::Only(1)
        );
        assert_eq!(
            category(json!({"type": "click", "id": 0})).unwrap(),
            QuizCategory::Any
        );
    }

    #[test]
    fn other_shapes_are_rejected() {
        assert!(category(json!([1, 2])).is_err());
        assert!(category(json!({"type": "Science"})).is_err());
        assert!(category(json!("science")).is_err());
        assert!(category(json!(1.5)).is_err());
        assert!(category(json!(true)).is_err());
    }

    #[test]
    fn missing_keys_do_not_deserialize() {
        assert!(serde_json::from_value::<QuizRequest>(json!({"quiz_category": 1})).is_err());
        assert!(serde_json::from_value::<QuizRequest>(json!({"previous_questions": []})).is_err());
    }

    #[test]
    fn null_category_is_present_but_any() {
        let req: QuizRequest =
            serde_json::from_value(json!({"previous_questions": [1, 2], "quiz_category": null}))
                .unwrap();

        assert_eq!(req.previous_questions, vec![1, 2]);
        assert_eq!(QuizCategory::try_from(&req.quiz_category).unwrap(), QuizCategory::Any);
    }

    #[test]
    fn exhausted_round_serializes_null() {
        let value = serde_json::to_value(QuizResponse { question: None }).unwrap();
        assert_eq!(value, json!({"question": null}));
    }
}
