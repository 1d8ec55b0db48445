use std::sync::Arc;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::json;

use crate::config::Config;
use crate::constants::prompts::build_quiz_prompt;
use crate::errors::{AppError, AppResult};
use crate::models::domain::Quiz;
use crate::services::validator;

/// Authors a quiz document from a topic. The HTTP handler only sees this
/// trait, so tests can swap in a mock instead of the live upstream.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizGenerator: Send + Sync {
    async fn generate(
        &self,
        topic: &str,
        question_count: u8,
        api_key: Option<String>,
    ) -> AppResult<Quiz>;
}

/// Calls the generative-language REST API and validates what comes back.
pub struct GeminiGenerator {
    http: reqwest::Client,
    config: Arc<Config>,
}

impl GeminiGenerator {
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn resolve_key(&self, api_key: Option<String>) -> AppResult<String> {
        if let Some(key) = api_key.filter(|key| !key.is_empty()) {
            return Ok(key);
        }
        self.config
            .default_api_key
            .as_ref()
            .map(|key| key.expose_secret().to_string())
            .ok_or_else(|| AppError::upstream(400, "API key is required"))
    }
}

#[async_trait]
impl QuizGenerator for GeminiGenerator {
    async fn generate(
        &self,
        topic: &str,
        question_count: u8,
        api_key: Option<String>,
    ) -> AppResult<Quiz> {
        let key = self.resolve_key(api_key)?;
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.config.generation_base_url, self.config.generation_model, key
        );
        let prompt = build_quiz_prompt(topic, question_count);

        log::info!(
            "requesting {} generated questions about '{}'",
            question_count,
            topic
        );

        let response = self
            .http
            .post(&url)
            .json(&json!({ "contents": [{ "parts": [{ "text": prompt }] }] }))
            .send()
            .await
            .map_err(|err| AppError::generation(format!("API call failed: {err}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| AppError::generation(format!("API call failed: {err}")))?;

        if !status.is_success() {
            return Err(AppError::upstream(
                status.as_u16(),
                upstream_error_message(status.as_u16(), &body),
            ));
        }

        let text = extract_candidate_text(&body)?;
        let document = strip_code_fences(&text);

        validator::validate(&document).map_err(|err| {
            log::warn!("generated document failed validation: {err}");
            AppError::generation(format!("Generated quiz was not usable: {err}"))
        })
    }
}

/// `API Error: {status}`, extended with the upstream error body's `message`
/// field when one parses out, else the first 100 characters of the raw body.
fn upstream_error_message(status: u16, body: &str) -> String {
    let mut message = format!("API Error: {status}");

    match serde_json::from_str::<UpstreamErrorBody>(body) {
        Ok(parsed) => {
            if let Some(error) = parsed.error {
                message.push_str(&format!(" - {}", error.message));
            }
        }
        Err(_) if !body.is_empty() => {
            let truncated: String = body.chars().take(100).collect();
            let ellipsis = if body.chars().count() > 100 { "..." } else { "" };
            message.push_str(&format!(" - {truncated}{ellipsis}"));
        }
        Err(_) => {}
    }
    message
}

/// Pulls `candidates[0].content.parts[0].text` out of a generation response.
fn extract_candidate_text(body: &str) -> AppResult<String> {
    let response: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|_| AppError::generation("Invalid response structure from API"))?;

    let text = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts)
        .and_then(|parts| parts.into_iter().next())
        .and_then(|part| part.text)
        .ok_or_else(|| AppError::generation("Invalid response structure from API"))?;

    if text.trim().is_empty() {
        return Err(AppError::generation("Empty response from API"));
    }
    Ok(text)
}

/// Models wrap JSON answers in markdown fences more often than not.
fn strip_code_fences(text: &str) -> String {
    text.replace("```json\n", "").replace("```", "")
}

#[derive(Debug, Deserialize)]
struct UpstreamErrorBody {
    error: Option<UpstreamErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct UpstreamErrorDetail {
    message: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_json_code_fences() {
        let wrapped = "```json\n{\"title\":\"T\"}\n```";
        assert_eq!(strip_code_fences(wrapped), "{\"title\":\"T\"}\n");
    }

    #[test]
    fn leaves_unfenced_text_alone() {
        assert_eq!(strip_code_fences("{\"title\":\"T\"}"), "{\"title\":\"T\"}");
    }

    #[test]
    fn upstream_message_uses_error_body_message() {
        let body = r#"{"error":{"message":"API key expired","status":"PERMISSION_DENIED"}}"#;
        assert_eq!(
            upstream_error_message(403, body),
            "API Error: 403 - API key expired"
        );
    }

    #[test]
    fn upstream_message_truncates_unparseable_bodies() {
        let body = "x".repeat(150);
        let message = upstream_error_message(500, &body);

        assert!(message.starts_with("API Error: 500 - "));
        assert!(message.ends_with("..."));
        assert_eq!(message.len(), "API Error: 500 - ".len() + 100 + 3);
    }

    #[test]
    fn upstream_message_without_body_is_bare() {
        assert_eq!(upstream_error_message(503, ""), "API Error: 503");
    }

    #[test]
    fn upstream_message_ignores_json_bodies_without_a_message() {
        assert_eq!(upstream_error_message(500, "{}"), "API Error: 500");
    }

    #[test]
    fn extracts_candidate_text() {
        let body = r#"{
            "candidates": [
                { "content": { "parts": [ { "text": "{\"a\":1}" } ] } }
            ]
        }"#;

        assert_eq!(
            extract_candidate_text(body).expect("text should extract"),
            "{\"a\":1}"
        );
    }

    #[test]
    fn missing_candidates_is_a_structure_error() {
        let err = extract_candidate_text("{}").expect_err("structure should be rejected");
        assert_eq!(
            err,
            AppError::generation("Invalid response structure from API")
        );
    }

    #[test]
    fn empty_candidate_text_is_rejected() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"  "}]}}]}"#;
        let err = extract_candidate_text(body).expect_err("empty text should be rejected");
        assert_eq!(err, AppError::generation("Empty response from API"));
    }

    #[tokio::test]
    async fn missing_api_key_is_rejected_before_any_call() {
        let mut config = Config::test_config();
        config.default_api_key = None;
        let generator = GeminiGenerator::new(Arc::new(config));

        let err = generator
            .generate("space", 5, None)
            .await
            .expect_err("keyless request must be rejected");
        assert_eq!(err, AppError::upstream(400, "API key is required"));
    }

    #[tokio::test]
    async fn caller_key_overrides_the_server_key() {
        let mut config = Config::test_config();
        config.default_api_key = None;
        let generator = GeminiGenerator::new(Arc::new(config));

        assert_eq!(
            generator
                .resolve_key(Some("own-key".to_string()))
                .expect("key resolves"),
            "own-key"
        );
    }
}
