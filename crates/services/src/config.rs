use std::env;

use lesson_core::model::LessonId;
use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000/";

/// Where the lesson backend lives, and the endpoints derived from it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    base_url: Url,
}

impl ServerConfig {
    /// Parse a backend base URL.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the URL does not parse or is not http(s).
    pub fn new(raw: &str) -> Result<Self, ConfigError> {
        let mut base_url = Url::parse(raw.trim())?;
        match base_url.scheme() {
            "http" | "https" => {}
            other => return Err(ConfigError::UnsupportedScheme(other.to_string())),
        }
        // Url::join replaces the last path segment unless the base ends in '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        base_url.set_query(None);
        base_url.set_fragment(None);
        Ok(Self { base_url })
    }

    /// Read `LESSON_SERVER_URL`, falling back to [`DEFAULT_SERVER_URL`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the variable is set to an unusable URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        match env::var("LESSON_SERVER_URL") {
            Ok(raw) if !raw.trim().is_empty() => Self::new(&raw),
            _ => Self::new(DEFAULT_SERVER_URL),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `POST` target that records a lesson as read.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if the joined URL is invalid.
    pub fn complete_lesson_url(&self, lesson_id: LessonId) -> Result<Url, ConfigError> {
        Ok(self.base_url.join(&format!("complete_lesson/{lesson_id}"))?)
    }

    /// Page the "take quiz" button navigates to.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if the joined URL is invalid.
    pub fn quiz_url(&self, lesson_id: LessonId) -> Result<Url, ConfigError> {
        Ok(self.base_url.join(&format!("quiz/{lesson_id}"))?)
    }
}
