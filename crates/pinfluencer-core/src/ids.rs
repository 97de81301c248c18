//! Resource identifiers.

use uuid::Uuid;

/// Generates a new random resource id.
#[must_use]
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Returns `true` when `candidate` is a UUID in canonical lowercase
/// hyphenated form.
///
/// Other spellings that would parse (braced, simple, uppercase) are rejected
/// so that ids round-trip byte for byte.
///
/// ```
/// use pinfluencer_core::ids::valid_uuid;
///
/// assert!(valid_uuid("0b3f8a9e-5d1c-4c2a-9b7e-3f6d2a1c8e4b"));
/// assert!(!valid_uuid("0B3F8A9E-5D1C-4C2A-9B7E-3F6D2A1C8E4B"));
/// assert!(!valid_uuid("not-a-uuid"));
/// ```
#[must_use]
pub fn valid_uuid(candidate: &str) -> bool {
    Uuid::parse_str(candidate)
        .map(|parsed| parsed.hyphenated().to_string() == candidate)
        .unwrap_or(false)
}
