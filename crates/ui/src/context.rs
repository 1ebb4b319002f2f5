use std::sync::Arc;

use lesson_core::Clock;
use lesson_core::model::LessonPage;
use services::{CompletionService, ServerConfig};

/// What the composition root (e.g. `crates/app`) hands to the UI.
pub trait UiApp: Send + Sync {
    fn lesson_page(&self) -> LessonPage;
    fn server(&self) -> ServerConfig;
    fn completion(&self) -> Arc<CompletionService>;

    fn clock(&self) -> Clock {
        Clock::default_clock()
    }
}

#[derive(Clone)]
pub struct AppContext {
    lesson_page: LessonPage,
    quiz_url: Option<String>,
    clock: Clock,
    completion: Arc<CompletionService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        let lesson_page = app.lesson_page();
        let quiz_url = match app.server().quiz_url(lesson_page.lesson_id()) {
            Ok(url) => Some(url.to_string()),
            Err(err) => {
                tracing::error!(error = %err, "cannot build quiz url; quiz button disabled");
                None
            }
        };

        Self {
            lesson_page,
            quiz_url,
            clock: app.clock(),
            completion: app.completion(),
        }
    }

    #[must_use]
    pub fn lesson_page(&self) -> &LessonPage {
        &self.lesson_page
    }

    #[must_use]
    pub fn quiz_url(&self) -> Option<&str> {
        self.quiz_url.as_deref()
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn completion(&self) -> Arc<CompletionService> {
        Arc::clone(&self.completion)
    }
}

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
