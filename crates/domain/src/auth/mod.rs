//! Authentication domain types

mod identity;
mod state;

pub use identity::{Identity, ProviderError, ProviderErrorCode};
pub use state::{AuthAction, AuthState, reduce};
