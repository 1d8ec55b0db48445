use serde::Deserialize;
use validator::Validate;

/// Body of `POST /api/generate`.
///
/// `api_key` is the caller's own upstream credential; when absent the
/// server-held key from configuration is used instead.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuizRequest {
    #[validate(length(min = 1, max = 200, message = "Topic must not be empty"))]
    pub topic: String,

    #[validate(range(min = 1, max = 20, message = "Question count must be between 1 and 20"))]
    pub question_count: u8,

    #[serde(default)]
    pub api_key: Option<String>,
}
