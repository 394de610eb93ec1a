//! Student and teacher login form controllers.
//!
//! Each form validates its fields synchronously, then makes exactly one
//! provider call. While that call is in flight the form reports
//! [`FormStatus::Submitting`] and rejects further submits.

use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;

use numberland_domain::{
    AuthAction, FormStatus, ProviderError, Student, StudentCredentials, Teacher,
    TeacherCredentials, User, ValidationError,
};

use super::messages::{STUDENT_SIGN_IN_FAILED, teacher_sign_in_message};
use super::store::{AuthStore, SignInGuard};

/// Why a submit did not sign anybody in.
#[derive(Debug, Error)]
pub enum LoginError {
    /// A previous submit is still waiting on the provider.
    #[error("a sign-in is already in progress")]
    InProgress,

    /// A field failed validation; the provider was not called.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The provider rejected the sign-in.
    #[error("{message}")]
    Provider {
        /// Message shown on the form.
        message: &'static str,
        /// Underlying provider failure, for logs.
        #[source]
        source: ProviderError,
    },
}

impl LoginError {
    /// Text to show under the form, `None` for rejected duplicate submits.
    #[must_use]
    pub fn user_message(&self) -> Option<String> {
        match self {
            Self::InProgress => None,
            Self::Validation(err) => Some(err.to_string()),
            Self::Provider { message, .. } => Some((*message).to_string()),
        }
    }

    /// Returns true if the provider was never configured.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Provider { source, .. } if source.is_configuration())
    }
}

/// Completion callback run after a successful sign-in.
type OnSuccess = Arc<dyn Fn(&User) + Send + Sync>;

/// Field values plus submission status, guarded together.
#[derive(Debug, Default)]
struct FormCell<C> {
    credentials: C,
    status: FormStatus,
}

struct Form<C> {
    cell: Mutex<FormCell<C>>,
}

impl<C: Clone + Default> Form<C> {
    fn new() -> Self {
        Self {
            cell: Mutex::new(FormCell::default()),
        }
    }

    /// Edits a field unless a submit is in flight (inputs are disabled).
    fn edit(&self, f: impl FnOnce(&mut C)) -> bool {
        let mut cell = self.cell.lock();
        if cell.status.is_submitting() {
            return false;
        }
        f(&mut cell.credentials);
        true
    }

    /// Clears the previous error, validates, and enters `Submitting`.
    fn begin(
        &self,
        validate: impl FnOnce(&C) -> Result<(), ValidationError>,
    ) -> Result<C, LoginError> {
        let mut cell = self.cell.lock();
        if cell.status.is_submitting() {
            return Err(LoginError::InProgress);
        }
        cell.status = FormStatus::Idle;
        if let Err(err) = validate(&cell.credentials) {
            cell.status = FormStatus::failed(err.to_string());
            return Err(err.into());
        }
        cell.status = FormStatus::Submitting;
        Ok(cell.credentials.clone())
    }

    fn status(&self) -> FormStatus {
        self.cell.lock().status.clone()
    }

    fn credentials(&self) -> C {
        self.cell.lock().credentials.clone()
    }
}

/// An accepted submit, from validation until the provider call resolves.
///
/// Dropping it before [`Submission::finish`] (the submit future was
/// cancelled) puts the form back to `Idle` so it can be used again.
struct Submission<'a, C> {
    form: &'a Form<C>,
    credentials: C,
    finished: bool,
    _sign_in: SignInGuard,
}

impl<C> Submission<'_, C> {
    fn finish(mut self, status: FormStatus) {
        self.form.cell.lock().status = status;
        self.finished = true;
    }
}

impl<C> Drop for Submission<'_, C> {
    fn drop(&mut self) {
        if !self.finished {
            self.form.cell.lock().status = FormStatus::Idle;
            tracing::debug!("submit abandoned before the provider answered");
        }
    }
}

/// Shared form plumbing: store access, completion callback, final dispatch.
struct Controller<C> {
    store: AuthStore,
    form: Form<C>,
    on_success: Option<OnSuccess>,
}

impl<C: Clone + Default> Controller<C> {
    fn new(store: AuthStore) -> Self {
        Self {
            store,
            form: Form::new(),
            on_success: None,
        }
    }

    fn begin(
        &self,
        validate: impl FnOnce(&C) -> Result<(), ValidationError>,
    ) -> Result<Submission<'_, C>, LoginError> {
        let credentials = self.form.begin(validate)?;
        Ok(Submission {
            form: &self.form,
            credentials,
            finished: false,
            _sign_in: self.store.begin_sign_in(),
        })
    }

    fn succeed(&self, submission: Submission<'_, C>, user: User) {
        self.store.dispatch(AuthAction::SetUser(Some(user.clone())));
        submission.finish(FormStatus::Succeeded);
        if let Some(on_success) = &self.on_success {
            on_success(&user);
        }
    }

    fn fail(
        &self,
        submission: Submission<'_, C>,
        message: &'static str,
        source: ProviderError,
    ) -> LoginError {
        tracing::error!(
            provider = self.store.provider().name(),
            code = %source.code,
            error = %source,
            "sign-in failed"
        );
        submission.finish(FormStatus::failed(message));
        LoginError::Provider { message, source }
    }
}

/// Student login: a name and a class code, anonymous provider sign-in.
pub struct StudentLogin {
    inner: Controller<StudentCredentials>,
}

impl StudentLogin {
    /// Creates an empty form bound to `store`.
    #[must_use]
    pub fn new(store: AuthStore) -> Self {
        Self {
            inner: Controller::new(store),
        }
    }

    /// Sets the callback run after a successful sign-in.
    #[must_use]
    pub fn on_success(mut self, f: impl Fn(&User) + Send + Sync + 'static) -> Self {
        self.inner.on_success = Some(Arc::new(f));
        self
    }

    /// Updates the name field. Ignored while submitting.
    pub fn set_name(&self, name: impl Into<String>) -> bool {
        let name = name.into();
        self.inner.form.edit(|c| c.name = name)
    }

    /// Updates the class code field. Ignored while submitting.
    pub fn set_class_code(&self, class_code: impl Into<String>) -> bool {
        let class_code = class_code.into();
        self.inner.form.edit(|c| c.class_code = class_code)
    }

    /// Current field values.
    #[must_use]
    pub fn credentials(&self) -> StudentCredentials {
        self.inner.form.credentials()
    }

    /// Current submission status.
    #[must_use]
    pub fn status(&self) -> FormStatus {
        self.inner.form.status()
    }

    /// Message shown under the form, if any.
    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.status().error().map(str::to_string)
    }

    /// Whether the submit control is disabled.
    #[must_use]
    pub fn is_submit_disabled(&self) -> bool {
        self.status().is_submit_disabled()
    }

    /// Validates the fields and signs the student in anonymously.
    ///
    /// # Errors
    ///
    /// Returns [`LoginError`] when a submit is already in flight, a field
    /// is invalid, or the provider fails. The form's error message is
    /// updated accordingly.
    pub async fn submit(&self) -> Result<Student, LoginError> {
        let submission = self.inner.begin(StudentCredentials::validate)?;
        let store = &self.inner.store;

        match store.provider().sign_in_anonymously().await {
            Ok(identity) => {
                let credentials = &submission.credentials;
                let student = Student::new(
                    identity.id,
                    &credentials.name,
                    &credentials.class_code,
                    store.clock().now(),
                );
                tracing::info!(
                    student_id = %student.id,
                    class_code = %student.class_code,
                    "student signed in"
                );
                self.inner.succeed(submission, student.clone().into());
                Ok(student)
            }
            Err(err) => Err(self.inner.fail(submission, STUDENT_SIGN_IN_FAILED, err)),
        }
    }
}

/// Teacher login: email and password against the provider.
pub struct TeacherLogin {
    inner: Controller<TeacherCredentials>,
}

impl TeacherLogin {
    /// Creates an empty form bound to `store`.
    #[must_use]
    pub fn new(store: AuthStore) -> Self {
        Self {
            inner: Controller::new(store),
        }
    }

    /// Sets the callback run after a successful sign-in.
    #[must_use]
    pub fn on_success(mut self, f: impl Fn(&User) + Send + Sync + 'static) -> Self {
        self.inner.on_success = Some(Arc::new(f));
        self
    }

    /// Updates the email field. Ignored while submitting.
    pub fn set_email(&self, email: impl Into<String>) -> bool {
        let email = email.into();
        self.inner.form.edit(|c| c.email = email)
    }

    /// Updates the password field. Ignored while submitting.
    pub fn set_password(&self, password: impl Into<String>) -> bool {
        let password = password.into();
        self.inner.form.edit(|c| c.password = password)
    }

    /// Current submission status.
    #[must_use]
    pub fn status(&self) -> FormStatus {
        self.inner.form.status()
    }

    /// Message shown under the form, if any.
    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.status().error().map(str::to_string)
    }

    /// Whether the submit control is disabled.
    #[must_use]
    pub fn is_submit_disabled(&self) -> bool {
        self.status().is_submit_disabled()
    }

    /// Validates the fields and signs the teacher in.
    ///
    /// # Errors
    ///
    /// Returns [`LoginError`] when a submit is already in flight, a field
    /// is invalid, or the provider rejects the credentials.
    pub async fn submit(&self) -> Result<Teacher, LoginError> {
        let submission = self.inner.begin(TeacherCredentials::validate)?;
        let store = &self.inner.store;
        let email = submission.credentials.normalized_email().to_string();

        match store
            .provider()
            .sign_in_with_credentials(&email, &submission.credentials.password)
            .await
        {
            Ok(identity) => {
                let teacher = Teacher::new(
                    identity.id,
                    identity.display_name.as_deref(),
                    identity.email.unwrap_or(email),
                );
                tracing::info!(teacher_id = %teacher.id, "teacher signed in");
                self.inner.succeed(submission, teacher.clone().into());
                Ok(teacher)
            }
            Err(err) => {
                let message = teacher_sign_in_message(&err.code);
                Err(self.inner.fail(submission, message, err))
            }
        }
    }
}
