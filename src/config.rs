use std::env;

use secrecy::SecretString;

#[derive(Clone, Debug)]
pub struct Config {
    pub web_server_host: String,
    pub web_server_port: u16,
    /// Base URL of the generative-language API.
    pub generation_base_url: String,
    /// Model name appended to the base URL for content generation.
    pub generation_model: String,
    /// Server-held upstream key used when the caller does not supply one.
    pub default_api_key: Option<SecretString>,
    /// Where the settings collaborator persists its JSON document.
    pub settings_path: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            generation_base_url: env::var("GENERATION_BASE_URL").unwrap_or_else(|_| {
                "https://generativelanguage.googleapis.com/v1beta".to_string()
            }),
            generation_model: env::var("GENERATION_MODEL")
                .unwrap_or_else(|_| "gemini-2.0-flash".to_string()),
            default_api_key: env::var("DEFAULT_API_KEY")
                .ok()
                .filter(|key| !key.is_empty())
                .map(SecretString::from),
            settings_path: env::var("SETTINGS_PATH")
                .unwrap_or_else(|_| "settings.json".to_string()),
        }
    }

    /// Warn about setups that can only serve callers bringing their own key.
    pub fn warn_if_incomplete(&self) {
        if self.default_api_key.is_none() {
            log::warn!(
                "DEFAULT_API_KEY is not set; generation requests without a caller-supplied key will be rejected"
            );
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            generation_base_url: "http://localhost:9090/v1beta".to_string(),
            generation_model: "gemini-2.0-flash".to_string(),
            default_api_key: Some(SecretString::from("test_api_key".to_string())),
            settings_path: "settings.json".to_string(),
        }
    }
}
