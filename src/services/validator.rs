use serde_json::Value;

use crate::errors::{AppError, AppResult};
use crate::models::domain::quiz::{Quiz, QuizQuestion, DEFAULT_TIME_LIMIT_SECS};

/// Decides whether `raw` is a well-formed quiz document and normalizes it.
///
/// Pure and deterministic: the same input always yields the same result and
/// nothing outside the return value is touched. Syntactically broken input
/// fails with `AppError::Parse`; structurally broken input with
/// `AppError::Schema`. A missing or unusable `timeLimit` becomes 20 seconds,
/// a missing `title` becomes the empty string.
///
/// Validation is stricter than a plain shape check in two places:
/// `correctIndex` must index into `answers`, and a question needs at least
/// two answers. Any answer count of two or more is accepted.
pub fn validate(raw: &str) -> AppResult<Quiz> {
    let document: Value =
        serde_json::from_str(raw).map_err(|err| AppError::Parse(err.to_string()))?;

    let root = document
        .as_object()
        .ok_or_else(|| AppError::Schema("quiz document must be a JSON object".to_string()))?;

    let title = root
        .get("title")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let raw_questions = root
        .get("questions")
        .and_then(Value::as_array)
        .ok_or_else(|| AppError::Schema("questions array is required".to_string()))?;

    if raw_questions.is_empty() {
        return Err(AppError::Schema("questions array is required".to_string()));
    }

    let mut questions = Vec::with_capacity(raw_questions.len());
    for (index, raw_question) in raw_questions.iter().enumerate() {
        questions.push(validate_question(index, raw_question)?);
    }

    Ok(Quiz { title, questions })
}

fn validate_question(index: usize, raw: &Value) -> AppResult<QuizQuestion> {
    let question = raw
        .as_object()
        .ok_or_else(|| schema_at(index, "must be an object"))?;

    let text = question
        .get("question")
        .and_then(Value::as_str)
        .ok_or_else(|| schema_at(index, "is missing a question text"))?
        .to_string();

    let answers = question
        .get("answers")
        .and_then(Value::as_array)
        .ok_or_else(|| schema_at(index, "is missing an answers array"))?;

    let answers: Vec<String> = answers
        .iter()
        .map(|answer| {
            answer
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| schema_at(index, "has a non-text answer"))
        })
        .collect::<AppResult<_>>()?;

    if answers.len() < 2 {
        return Err(schema_at(index, "needs at least two answers"));
    }

    let correct_index = question
        .get("correctIndex")
        .and_then(Value::as_u64)
        .ok_or_else(|| schema_at(index, "is missing a numeric correctIndex"))?
        as usize;

    if correct_index >= answers.len() {
        return Err(schema_at(index, "has a correctIndex outside its answers"));
    }

    let time_limit_secs = question
        .get("timeLimit")
        .and_then(Value::as_u64)
        .filter(|&seconds| seconds > 0)
        .unwrap_or(DEFAULT_TIME_LIMIT_SECS);

    Ok(QuizQuestion {
        text,
        answers,
        correct_index,
        time_limit_secs,
    })
}

fn schema_at(index: usize, problem: &str) -> AppError {
    AppError::Schema(format!("question {} {}", index + 1, problem))
}
