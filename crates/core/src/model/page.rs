use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::LessonId;

/// Anti-forgery token issued by the backend for this page.
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CsrfToken(String);

impl CsrfToken {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CsrfToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CsrfToken(<redacted>)")
    }
}

/// Everything the host page hands to the lesson viewer at load time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonPage {
    lesson_id: LessonId,
    csrf_token: CsrfToken,
    title: String,
    body_markdown: String,
    initial_xp: u64,
    already_completed: bool,
}

impl LessonPage {
    #[must_use]
    pub fn new(lesson_id: LessonId, csrf_token: CsrfToken) -> Self {
        Self {
            lesson_id,
            csrf_token,
            title: format!("Lesson {lesson_id}"),
            body_markdown: String::new(),
            initial_xp: 0,
            already_completed: false,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_body(mut self, body_markdown: impl Into<String>) -> Self {
        self.body_markdown = body_markdown.into();
        self
    }

    #[must_use]
    pub fn with_initial_xp(mut self, xp: u64) -> Self {
        self.initial_xp = xp;
        self
    }

    #[must_use]
    pub fn with_already_completed(mut self, completed: bool) -> Self {
        self.already_completed = completed;
        self
    }

    #[must_use]
    pub fn lesson_id(&self) -> LessonId {
        self.lesson_id
    }

    #[must_use]
    pub fn csrf_token(&self) -> &CsrfToken {
        &self.csrf_token
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn body_markdown(&self) -> &str {
        &self.body_markdown
    }

    #[must_use]
    pub fn initial_xp(&self) -> u64 {
        self.initial_xp
    }

    #[must_use]
    pub fn already_completed(&self) -> bool {
        self.already_completed
    }
}
