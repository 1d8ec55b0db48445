use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::errors::AppResult;

/// Which upstream credential the setup screen uses for generation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiKeyChoice {
    /// The user's own key, sent along with the request.
    #[default]
    Own,
    /// The server-held key; the request carries no credential.
    Cloud,
}

/// The setup screen's persisted knobs, loaded once at startup and passed to
/// whoever needs them rather than living as ambient globals.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub api_choice: ApiKeyChoice,
    #[serde(default)]
    pub saved_api_key: Option<String>,
    #[serde(default = "default_question_count")]
    pub question_count: u8,
}

fn default_question_count() -> u8 {
    5
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_choice: ApiKeyChoice::default(),
            saved_api_key: None,
            question_count: default_question_count(),
        }
    }
}

/// Key-value persistence seam for settings. The production store is a JSON
/// file; tests mock this.
#[cfg_attr(test, mockall::automock)]
pub trait SettingsStore: Send + Sync {
    fn load(&self) -> AppResult<Option<Settings>>;
    fn save(&self, settings: &Settings) -> AppResult<()>;
}

pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SettingsStore for FileSettingsStore {
    fn load(&self) -> AppResult<Option<Settings>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)?;
        match serde_json::from_str(&raw) {
            Ok(settings) => Ok(Some(settings)),
            Err(err) => {
                // A corrupt settings file should never block startup.
                log::warn!("ignoring unreadable settings file: {err}");
                Ok(None)
            }
        }
    }

    fn save(&self, settings: &Settings) -> AppResult<()> {
        let raw = serde_json::to_string_pretty(settings)
            .map_err(|err| crate::errors::AppError::Internal(err.to_string()))?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

/// Holds the current settings and writes through the store on every change.
pub struct SettingsService<S: SettingsStore> {
    store: S,
    current: Settings,
}

impl<S: SettingsStore> SettingsService<S> {
    /// Loads persisted settings, falling back to defaults for a fresh setup.
    pub fn load(store: S) -> AppResult<Self> {
        let current = store.load()?.unwrap_or_default();
        Ok(Self { store, current })
    }

    pub fn current(&self) -> &Settings {
        &self.current
    }

    /// Applies a change and persists it before returning.
    pub fn update(&mut self, apply: impl FnOnce(&mut Settings)) -> AppResult<&Settings> {
        apply(&mut self.current);
        self.store.save(&self.current)?;
        Ok(&self.current)
    }
}
