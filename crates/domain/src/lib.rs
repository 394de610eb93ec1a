//! Numberland Domain - Core types
//!
//! This crate defines the domain model for Numberland Adventures sign-in:
//! user profiles, the auth state reducer, login validation rules and the
//! design tokens. All types here are pure Rust with no I/O dependencies.

pub mod auth;
pub mod error;
pub mod id;
pub mod state;
pub mod theme;
pub mod user;
pub mod validation;

pub use auth::{AuthAction, AuthState, Identity, ProviderError, ProviderErrorCode, reduce};
pub use error::{DomainError, DomainResult};
pub use id::{generate_id, generate_offline_id};
pub use state::FormStatus;
pub use user::{Class, QuestCompletion, Student, Teacher, User};
pub use validation::{StudentCredentials, TeacherCredentials, ValidationError};
