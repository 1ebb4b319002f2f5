use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shown when the completion request fails before the server could answer.
pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred. Please try again.";

/// JSON body returned by `POST /complete_lesson/{id}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionReply {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub xp: Option<u64>,
}

/// A `success: true` reply that did not say what the new XP total is.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("completion reply reported success without an xp total")]
pub struct MalformedReply;

impl CompletionReply {
    /// Interpret the reply.
    ///
    /// # Errors
    ///
    /// Returns `MalformedReply` when the server reports success but omits `xp`.
    pub fn into_outcome(self) -> Result<CompletionOutcome, MalformedReply> {
        if !self.success {
            return Ok(CompletionOutcome::Rejected {
                message: self.message,
            });
        }
        let xp = self.xp.ok_or(MalformedReply)?;
        Ok(CompletionOutcome::Awarded {
            message: self.message,
            xp,
        })
    }
}

/// What happened to a completion request, from the reader's point of view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// The server recorded the completion and reports the new XP total.
    Awarded { message: String, xp: u64 },
    /// The server answered but refused (e.g. already completed).
    Rejected { message: String },
    /// The request never produced a usable answer.
    Failed,
}

impl CompletionOutcome {
    #[must_use]
    pub fn is_awarded(&self) -> bool {
        matches!(self, Self::Awarded { .. })
    }

    /// The text to show the reader.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Awarded { message, .. } | Self::Rejected { message } => message,
            Self::Failed => GENERIC_FAILURE_MESSAGE,
        }
    }
}
