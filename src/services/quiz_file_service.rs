use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

use crate::errors::AppResult;
use crate::models::domain::Quiz;
use crate::services::validator;

/// Reads a quiz document from disk and runs it through the validator, so a
/// hand-edited file gets the same treatment as pasted text.
pub fn load_quiz(path: &Path) -> AppResult<Quiz> {
    let raw = fs::read_to_string(path)?;
    validator::validate(&raw)
}

/// Writes the pretty-printed document into `dir`, named after the sanitized
/// title, and returns the path it landed at.
pub fn save_quiz(quiz: &Quiz, dir: &Path) -> AppResult<PathBuf> {
    let path = dir.join(format!("{}.json", sanitize_filename(&quiz.title)));
    fs::write(&path, quiz.to_pretty_json()?)?;
    Ok(path)
}

/// Keeps alphanumerics, spaces, dashes and underscores; anything else is
/// dropped. An empty result falls back to `quiz`.
pub fn sanitize_filename(title: &str) -> String {
    static DISALLOWED: OnceLock<Regex> = OnceLock::new();
    let disallowed = DISALLOWED.get_or_init(|| {
        Regex::new(r"[^A-Za-z0-9 _-]").expect("filename pattern is a valid regex")
    });

    let cleaned = disallowed.replace_all(title, "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        "quiz".to_string()
    } else {
        cleaned.to_string()
    }
}
