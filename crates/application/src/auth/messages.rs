//! User-facing messages for provider failures.

use numberland_domain::ProviderErrorCode;

/// Shown when the anonymous student sign-in fails for any reason.
pub const STUDENT_SIGN_IN_FAILED: &str = "Failed to start adventure. Please try again.";

/// Shown when a teacher sign-in fails with an unmapped code.
pub const TEACHER_SIGN_IN_FAILED: &str = "Failed to sign in. Please try again.";

/// Message for a failed teacher sign-in.
///
/// Raw provider text never reaches the user: codes outside the table get
/// [`TEACHER_SIGN_IN_FAILED`].
#[must_use]
pub const fn teacher_sign_in_message(code: &ProviderErrorCode) -> &'static str {
    match code {
        ProviderErrorCode::UserNotFound => "No account found with this email address",
        ProviderErrorCode::WrongPassword => "Incorrect password",
        ProviderErrorCode::InvalidEmail => "Invalid email address",
        ProviderErrorCode::Network
        | ProviderErrorCode::NotConfigured
        | ProviderErrorCode::Other(_) => TEACHER_SIGN_IN_FAILED,
    }
}
