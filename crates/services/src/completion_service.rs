use std::sync::Arc;

use lesson_core::model::{CompletionOutcome, CsrfToken, LessonId};

use crate::lesson_api::LessonApi;

/// Sends the one completion request a page load is allowed.
///
/// There is no retry: whatever the first attempt yields is the outcome.
#[derive(Clone)]
pub struct CompletionService {
    api: Arc<dyn LessonApi>,
}

impl CompletionService {
    #[must_use]
    pub fn new(api: Arc<dyn LessonApi>) -> Self {
        Self { api }
    }

    /// Record the lesson as completed on the server.
    ///
    /// Transport failures are logged and folded into
    /// `CompletionOutcome::Failed`.
    pub async fn complete(&self, lesson_id: LessonId, csrf_token: &CsrfToken) -> CompletionOutcome {
        tracing::debug!(%lesson_id, "sending lesson completion");

        let reply = match self.api.complete_lesson(lesson_id, csrf_token).await {
            Ok(reply) => reply,
            Err(err) => {
                tracing::error!(%lesson_id, error = %err, "lesson completion request failed");
                return CompletionOutcome::Failed;
            }
        };

        match reply.into_outcome() {
            Ok(outcome @ CompletionOutcome::Awarded { xp, .. }) => {
                tracing::info!(%lesson_id, xp, "lesson completed");
                outcome
            }
            Ok(outcome) => {
                tracing::warn!(%lesson_id, message = outcome.message(), "lesson completion refused");
                outcome
            }
            Err(err) => {
                tracing::error!(%lesson_id, error = %err, "lesson completion reply unusable");
                CompletionOutcome::Failed
            }
        }
    }
}
