//! Test helpers for generating unique test data
//!
//! Visitor identities are opaque to the backend, so any distinct string works.
//! UUIDs keep concurrently running tests from colliding on the same voter.

use uuid::Uuid;

/// Generate a unique string with the given prefix
///
/// # Examples
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let id1 = unique_str("visitor");
/// let id2 = unique_str("visitor");
/// assert_ne!(id1, id2);
/// assert!(id1.starts_with("visitor-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4())
}

/// Generate `count` distinct visitor identities sharing a prefix.
pub fn unique_visitors(prefix: &str, count: usize) -> Vec<String> {
    (0..count).map(|_| unique_str(prefix)).collect()
}
