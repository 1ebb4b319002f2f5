use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::{CompletionOutcome, LessonId, Progress, ScrollMetrics};
use crate::time::Clock;

/// Where a lesson is in its read-to-completion lifecycle.
///
/// Every phase other than `Reading` means the lesson is completed for the
/// rest of this page load.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LessonPhase {
    Reading,
    Completing,
    Completed,
    CompletedWithError,
}

impl LessonPhase {
    #[must_use]
    pub fn is_completed(self) -> bool {
        !matches!(self, Self::Reading)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    #[error("no completion request is in flight (phase: {phase:?})")]
    NotCompleting { phase: LessonPhase },
}

/// Result of feeding one scroll measurement to the tracker.
#[derive(Clone, Copy, Debug, PartialEq)]
#[must_use]
pub struct ScrollUpdate {
    pub progress: Progress,
    /// True exactly once: on the measurement that first reached the bottom.
    pub should_complete: bool,
}

/// Owns the "lesson completed" flag for one page load.
#[derive(Clone, Debug)]
pub struct LessonTracker {
    lesson_id: LessonId,
    phase: LessonPhase,
    completed_at: Option<DateTime<Utc>>,
    clock: Clock,
}

impl LessonTracker {
    #[must_use]
    pub fn new(lesson_id: LessonId, clock: Clock) -> Self {
        Self {
            lesson_id,
            phase: LessonPhase::Reading,
            completed_at: None,
            clock,
        }
    }

    /// A tracker for a lesson the server already reports as completed.
    #[must_use]
    pub fn resumed(lesson_id: LessonId, clock: Clock) -> Self {
        Self {
            lesson_id,
            phase: LessonPhase::Completed,
            completed_at: None,
            clock,
        }
    }

    #[must_use]
    pub fn lesson_id(&self) -> LessonId {
        self.lesson_id
    }

    #[must_use]
    pub fn phase(&self) -> LessonPhase {
        self.phase
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.phase.is_completed()
    }

    /// When this page load marked the lesson completed. `None` for resumed
    /// lessons and lessons still being read.
    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Record one scroll measurement.
    pub fn observe(&mut self, metrics: ScrollMetrics) -> ScrollUpdate {
        let progress = metrics.progress();
        let should_complete = metrics.reached_bottom() && self.begin_completion();
        ScrollUpdate {
            progress,
            should_complete,
        }
    }

    /// Set the completed flag. Returns false if it was already set.
    pub fn begin_completion(&mut self) -> bool {
        if self.phase.is_completed() {
            return false;
        }
        self.phase = LessonPhase::Completing;
        self.completed_at = Some(self.clock.now());
        true
    }

    /// Settle the in-flight completion request.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::NotCompleting` unless a request is in flight.
    pub fn finish(&mut self, outcome: &CompletionOutcome) -> Result<LessonPhase, TrackerError> {
        if self.phase != LessonPhase::Completing {
            return Err(TrackerError::NotCompleting { phase: self.phase });
        }
        self.phase = if outcome.is_awarded() {
            LessonPhase::Completed
        } else {
            LessonPhase::CompletedWithError
        };
        Ok(self.phase)
    }
}
