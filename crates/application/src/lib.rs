//! Numberland Application - Auth flow and ports
//!
//! This crate defines the application layer with:
//! - Port traits (identity provider, clock)
//! - The session auth store and login form controllers
//! - Application-level error handling

pub mod auth;
pub mod error;
pub mod ports;

pub use auth::{
    AuthStore, LoginError, STUDENT_SIGN_IN_FAILED, StudentLogin, TEACHER_SIGN_IN_FAILED,
    TeacherLogin, teacher_sign_in_message,
};
pub use error::{ApplicationError, ApplicationResult};
pub use ports::{AuthListener, Clock, IdentityProvider, Subscription};
