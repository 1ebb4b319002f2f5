use chrono::{DateTime, Utc};
use lesson_core::Clock;
use lesson_core::model::{
    CompletionOutcome, CsrfToken, LessonId, LessonPage, LessonPhase, LessonTracker, Progress,
    ScrollMetrics, ScrollUpdate,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Success => "notice notice-success",
            Self::Error => "notice notice-error",
        }
    }
}

/// A message shown to the reader after the completion request settles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

/// Side effects the view must run after an outcome is applied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[must_use]
pub struct LessonEffects {
    pub celebrate: bool,
}

/// Page-visible state of the lesson viewer.
pub struct LessonVm {
    page: LessonPage,
    tracker: LessonTracker,
    progress: Progress,
    xp: u64,
    quiz_visible: bool,
    notice: Option<Notice>,
}

impl LessonVm {
    #[must_use]
    pub fn new(page: LessonPage, clock: Clock) -> Self {
        let tracker = if page.already_completed() {
            LessonTracker::resumed(page.lesson_id(), clock)
        } else {
            LessonTracker::new(page.lesson_id(), clock)
        };
        Self {
            xp: page.initial_xp(),
            quiz_visible: page.already_completed(),
            page,
            tracker,
            progress: Progress::ZERO,
            notice: None,
        }
    }

    #[must_use]
    pub fn lesson_id(&self) -> LessonId {
        self.page.lesson_id()
    }

    #[must_use]
    pub fn csrf_token(&self) -> &CsrfToken {
        self.page.csrf_token()
    }

    #[must_use]
    pub fn title(&self) -> &str {
        self.page.title()
    }

    #[must_use]
    pub fn phase(&self) -> LessonPhase {
        self.tracker.phase()
    }

    /// When this page load marked the lesson completed.
    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.tracker.completed_at()
    }

    #[must_use]
    pub fn progress(&self) -> Progress {
        self.progress
    }

    #[must_use]
    pub fn xp(&self) -> u64 {
        self.xp
    }

    #[must_use]
    pub fn quiz_visible(&self) -> bool {
        self.quiz_visible
    }

    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Update progress from a measurement. When `should_complete` is set the
    /// caller owns sending the completion request.
    pub fn observe_scroll(&mut self, metrics: ScrollMetrics) -> ScrollUpdate {
        let update = self.tracker.observe(metrics);
        self.progress = update.progress;
        if update.should_complete {
            tracing::debug!(lesson_id = %self.lesson_id(), "lesson read to the end");
        }
        update
    }

    /// Apply the settled completion request to the page.
    pub fn apply_outcome(&mut self, outcome: CompletionOutcome) -> LessonEffects {
        if let Err(err) = self.tracker.finish(&outcome) {
            tracing::warn!(lesson_id = %self.lesson_id(), error = %err, "ignoring completion outcome");
            return LessonEffects::default();
        }

        tracing::info!(
            lesson_id = %self.lesson_id(),
            awarded = outcome.is_awarded(),
            completed_at = ?self.tracker.completed_at(),
            "completion settled"
        );

        let kind = if outcome.is_awarded() {
            NoticeKind::Success
        } else {
            NoticeKind::Error
        };
        self.notice = Some(Notice {
            kind,
            text: outcome.message().to_string(),
        });

        match outcome {
            CompletionOutcome::Awarded { xp, .. } => {
                self.xp = xp;
                self.quiz_visible = true;
                LessonEffects { celebrate: true }
            }
            CompletionOutcome::Rejected { .. } | CompletionOutcome::Failed => {
                LessonEffects::default()
            }
        }
    }
}
