//! Test helpers for generating unique test data
//!
//! Values are derived from ULIDs so fixtures created by different tests never
//! collide on unique columns.

use ulid::Ulid;

/// Generate a unique string with the given prefix
///
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let id1 = unique_str("user");
/// let id2 = unique_str("user");
/// assert_ne!(id1, id2);
/// assert!(id1.starts_with("user-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// Generate a unique email address with the given prefix
///
/// ```
/// use backend_test_support::unique_helpers::unique_email;
///
/// let email = unique_email("test");
/// assert!(email.ends_with("@example.test"));
/// assert!(email.starts_with("test-"));
/// ```
pub fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.test", prefix.to_lowercase(), Ulid::new().to_string().to_lowercase())
}

/// Generate a unique, all-digit identity document number of 10 characters.
pub fn unique_cedula() -> String {
    let digits = Ulid::new().random() % 10_000_000_000u128;
    format!("{digits:010}")
}
