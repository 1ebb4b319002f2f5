use async_trait::async_trait;
use lesson_core::model::{CompletionReply, CsrfToken, LessonId};
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::{Client, Request};

use crate::config::ServerConfig;
use crate::error::CompletionError;

/// Header the backend reads the anti-forgery token from.
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// The lesson backend, as seen by the viewer.
#[async_trait]
pub trait LessonApi: Send + Sync {
    /// Ask the backend to record `lesson_id` as completed for the current reader.
    async fn complete_lesson(
        &self,
        lesson_id: LessonId,
        csrf_token: &CsrfToken,
    ) -> Result<CompletionReply, CompletionError>;
}

/// `LessonApi` over HTTP.
#[derive(Clone)]
pub struct HttpLessonApi {
    client: Client,
    config: ServerConfig,
}

impl HttpLessonApi {
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Build the completion request without sending it.
    ///
    /// # Errors
    ///
    /// Returns `CompletionError` if the URL or token cannot be encoded.
    pub fn build_request(
        &self,
        lesson_id: LessonId,
        csrf_token: &CsrfToken,
    ) -> Result<Request, CompletionError> {
        let url = self.config.complete_lesson_url(lesson_id)?;
        let request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .header(CSRF_HEADER, csrf_token.as_str())
            .build()?;
        Ok(request)
    }
}

#[async_trait]
impl LessonApi for HttpLessonApi {
    async fn complete_lesson(
        &self,
        lesson_id: LessonId,
        csrf_token: &CsrfToken,
    ) -> Result<CompletionReply, CompletionError> {
        let request = self.build_request(lesson_id, csrf_token)?;
        let response = self.client.execute(request).await?;
        let status = response.status();
        let body = response.bytes().await?;

        // The backend answers refusals with a JSON body too, so the body wins
        // over the status code whenever it parses.
        match serde_json::from_slice::<CompletionReply>(&body) {
            Ok(reply) => Ok(reply),
            Err(_) if !status.is_success() => Err(CompletionError::HttpStatus(status)),
            Err(err) => Err(CompletionError::Decode(err)),
        }
    }
}
