mod completion;
mod ids;
mod page;
mod progress;
mod tracker;

pub use completion::{CompletionOutcome, CompletionReply, GENERIC_FAILURE_MESSAGE, MalformedReply};
pub use ids::{LessonId, LessonIdError};
pub use page::{CsrfToken, LessonPage};
pub use progress::{BOTTOM_THRESHOLD, Progress, ScrollMetrics};
pub use tracker::{LessonPhase, LessonTracker, ScrollUpdate, TrackerError};
