#![forbid(unsafe_code)]

pub mod completion_service;
pub mod config;
pub mod error;
pub mod lesson_api;

pub use completion_service::CompletionService;
pub use config::{DEFAULT_SERVER_URL, ServerConfig};
pub use error::{CompletionError, ConfigError};
pub use lesson_api::{CSRF_HEADER, HttpLessonApi, LessonApi};
pub use reqwest::StatusCode;
