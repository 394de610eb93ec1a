//! Locally generated identifiers.
//!
//! User ids normally come from the identity provider. These are used only
//! by the offline provider and for classes created on the device.

use uuid::Uuid;

/// Generates a time-ordered UUID v7 as a string.
#[must_use]
pub fn generate_id() -> String {
    Uuid::now_v7().to_string()
}

/// Generates an id for an offline identity, prefixed so it is never
/// mistaken for a provider-issued one.
#[must_use]
pub fn generate_offline_id() -> String {
    format!("offline-{}", Uuid::now_v7().simple())
}
