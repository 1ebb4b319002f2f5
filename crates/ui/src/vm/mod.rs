mod confetti_vm;
mod lesson_vm;
mod markdown_vm;

pub use confetti_vm::{
    CONFETTI_COLORS, CONFETTI_COUNT, CONFETTI_LAUNCH_DELAY, CONFETTI_LIFETIME, CONFETTI_SPREAD,
    ConfettiParticle, confetti_burst,
};
pub use lesson_vm::{LessonEffects, LessonVm, Notice, NoticeKind};
pub use markdown_vm::{lesson_body_html, sanitize_html};
