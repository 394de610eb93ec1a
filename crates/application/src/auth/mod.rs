//! Authentication flow for Numberland Adventures.
//!
//! This module provides:
//! - The session-wide [`AuthStore`] built on the auth reducer
//! - Student and teacher login form controllers
//! - Mapping of provider failures to user-facing messages

mod login;
mod messages;
mod store;

#[cfg(test)]
pub(crate) mod fake;

pub use login::{LoginError, StudentLogin, TeacherLogin};
pub use messages::{STUDENT_SIGN_IN_FAILED, TEACHER_SIGN_IN_FAILED, teacher_sign_in_message};
pub use store::AuthStore;
