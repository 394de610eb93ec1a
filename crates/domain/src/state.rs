//! Login form submission state for UI binding.
//!
//! Forms move `Idle -> Submitting -> Succeeded | Failed` and return to
//! `Submitting` on the next attempt, or to `Idle` if an attempt is
//! abandoned. The submit control is disabled while a submission is in flight.

use serde::{Deserialize, Serialize};

/// Represents the current state of a login form.
///
/// - `Idle`: nothing submitted yet
/// - `Submitting`: provider call in flight, submit disabled
/// - `Succeeded`: user signed in, host may redirect
/// - `Failed`: show the message and allow another attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FormStatus {
    /// No submission yet.
    #[default]
    Idle,

    /// Submission in progress.
    Submitting,

    /// Sign-in succeeded.
    Succeeded,

    /// Validation or sign-in failed.
    Failed {
        /// User-facing message.
        message: String,
    },
}

impl FormStatus {
    /// Creates a Failed state.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }

    /// Returns true while a submission is in flight.
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    /// Returns true if the submit control should be disabled.
    #[must_use]
    pub const fn is_submit_disabled(&self) -> bool {
        self.is_submitting()
    }

    /// Returns true after a successful sign-in.
    #[must_use]
    pub const fn is_succeeded(&self) -> bool {
        matches!(self, Self::Succeeded)
    }

    /// Message to show under the form, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed { message } => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_allows_submit() {
        let state = FormStatus::default();
        assert!(!state.is_submit_disabled());
        assert!(state.error().is_none());
    }

    #[test]
    fn submitting_disables_submit() {
        let state = FormStatus::Submitting;
        assert!(state.is_submitting());
        assert!(state.is_submit_disabled());
        assert!(state.error().is_none());
    }

    #[test]
    fn failed_exposes_message() {
        let state = FormStatus::failed("Incorrect password");
        assert_eq!(state.error(), Some("Incorrect password"));
        assert!(!state.is_submit_disabled());
        assert!(!state.is_succeeded());
    }
}
