//! Auth state snapshot and its reducer.
//!
//! The state only changes through [`reduce`], which maps the current
//! snapshot and one [`AuthAction`] to the next snapshot.

use serde::{Deserialize, Serialize};

use crate::user::User;

/// Snapshot of the session's authentication state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthState {
    /// The signed-in user, `None` before sign-in and after logout.
    pub user: Option<User>,
    /// True while the initial identity check is outstanding.
    pub loading: bool,
    /// Last error reported to the store.
    pub error: Option<String>,
}

impl AuthState {
    /// State at session start: no user, identity check pending.
    #[must_use]
    pub const fn initial() -> Self {
        Self {
            user: None,
            loading: true,
            error: None,
        }
    }

    /// Returns true if a user is signed in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

impl Default for AuthState {
    fn default() -> Self {
        Self::initial()
    }
}

/// The actions accepted by [`reduce`].
#[derive(Debug, Clone, PartialEq)]
pub enum AuthAction {
    /// Replace the user; ends loading and clears the error.
    SetUser(Option<User>),
    /// Set the loading flag. Leaves the error untouched.
    SetLoading(bool),
    /// Record an error; ends loading.
    SetError(String),
    /// Clear the session.
    Logout,
}

impl AuthAction {
    /// Short name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SetUser(_) => "SET_USER",
            Self::SetLoading(_) => "SET_LOADING",
            Self::SetError(_) => "SET_ERROR",
            Self::Logout => "LOGOUT",
        }
    }
}

/// Computes the next state from `state` and `action`.
#[must_use]
pub fn reduce(state: AuthState, action: AuthAction) -> AuthState {
    match action {
        AuthAction::SetUser(user) => AuthState {
            user,
            loading: false,
            error: None,
        },
        AuthAction::SetLoading(loading) => AuthState { loading, ..state },
        AuthAction::SetError(error) => AuthState {
            error: Some(error),
            loading: false,
            ..state
        },
        AuthAction::Logout => AuthState {
            user: None,
            loading: false,
            error: None,
        },
    }
}
