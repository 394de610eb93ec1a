//! Identity provider adapters.
//!
//! - [`FirebaseIdentityProvider`]: Identity Toolkit REST API
//! - [`OfflineIdentityProvider`]: in-process fallback when unconfigured

mod firebase_provider;
mod offline_provider;
mod session;

pub use firebase_provider::FirebaseIdentityProvider;
pub use offline_provider::OfflineIdentityProvider;
pub use session::IdentitySession;
