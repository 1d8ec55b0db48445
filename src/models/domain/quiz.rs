use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

/// Seconds a player gets when a question carries no usable `timeLimit`.
pub const DEFAULT_TIME_LIMIT_SECS: u64 = 20;

/// A quiz document: a title and an ordered, non-empty list of questions.
///
/// The serialized form is the wire/file format the browser UI, the file
/// collaborator and the generation endpoint all exchange, so the JSON field
/// names are fixed.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Quiz {
    #[serde(default)]
    pub title: String,
    pub questions: Vec<QuizQuestion>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizQuestion {
    #[serde(rename = "question")]
    pub text: String,
    pub answers: Vec<String>,
    #[serde(rename = "correctIndex")]
    pub correct_index: usize,
    #[serde(rename = "timeLimit", default = "default_time_limit")]
    pub time_limit_secs: u64,
}

fn default_time_limit() -> u64 {
    DEFAULT_TIME_LIMIT_SECS
}

impl Quiz {
    /// Pretty-printed document text, as offered for download by the UI.
    pub fn to_pretty_json(&self) -> AppResult<String> {
        serde_json::to_string_pretty(self).map_err(|err| AppError::Internal(err.to_string()))
    }
}

impl QuizQuestion {
    pub fn correct_answer(&self) -> &str {
        // The validator guarantees correct_index is in bounds.
        self.answers
            .get(self.correct_index)
            .map(String::as_str)
            .unwrap_or_default()
    }
}
