//! Login form validation rules.
//!
//! Each form checks its rules in a fixed order and reports only the first
//! failure. Messages are shown to the user verbatim.

use thiserror::Error;

/// Minimum trimmed length of a student name.
pub const MIN_NAME_LEN: usize = 2;

/// Minimum trimmed length of a class code.
pub const MIN_CLASS_CODE_LEN: usize = 3;

/// Minimum length of a teacher password.
pub const MIN_PASSWORD_LEN: usize = 6;

/// A failed form rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Student name is blank.
    #[error("Name is required")]
    NameRequired,
    /// Class code is blank.
    #[error("Class code is required")]
    ClassCodeRequired,
    /// Student name is too short.
    #[error("Name must be at least 2 characters")]
    NameTooShort,
    /// Class code is too short.
    #[error("Class code must be at least 3 characters")]
    ClassCodeTooShort,
    /// Email is blank.
    #[error("Email is required")]
    EmailRequired,
    /// Password is blank.
    #[error("Password is required")]
    PasswordRequired,
    /// Email has no `@`.
    #[error("Please enter a valid email address")]
    InvalidEmail,
    /// Password is too short.
    #[error("Password must be at least 6 characters")]
    PasswordTooShort,
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Raw input of the student login form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentCredentials {
    /// Typed name.
    pub name: String,
    /// Typed class code.
    pub class_code: String,
}

impl StudentCredentials {
    /// Creates credentials from raw field values.
    #[must_use]
    pub fn new(name: impl Into<String>, class_code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            class_code: class_code.into(),
        }
    }

    /// Checks the rules in order and returns the first failure.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] of the first failing rule.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let name = self.name.trim();
        let class_code = self.class_code.trim();

        if name.is_empty() {
            return Err(ValidationError::NameRequired);
        }
        if class_code.is_empty() {
            return Err(ValidationError::ClassCodeRequired);
        }
        if char_len(name) < MIN_NAME_LEN {
            return Err(ValidationError::NameTooShort);
        }
        if char_len(class_code) < MIN_CLASS_CODE_LEN {
            return Err(ValidationError::ClassCodeTooShort);
        }
        Ok(())
    }
}

/// Raw input of the teacher login form.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct TeacherCredentials {
    /// Typed email.
    pub email: String,
    /// Typed password.
    pub password: String,
}

impl std::fmt::Debug for TeacherCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TeacherCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl TeacherCredentials {
    /// Creates credentials from raw field values.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Checks the rules in order and returns the first failure.
    ///
    /// The password is not trimmed for the length rule.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] of the first failing rule.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.email.trim().is_empty() {
            return Err(ValidationError::EmailRequired);
        }
        if self.password.trim().is_empty() {
            return Err(ValidationError::PasswordRequired);
        }
        if !self.email.contains('@') {
            return Err(ValidationError::InvalidEmail);
        }
        if char_len(&self.password) < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort);
        }
        Ok(())
    }

    /// Email as sent to the provider.
    #[must_use]
    pub fn normalized_email(&self) -> &str {
        self.email.trim()
    }
}
