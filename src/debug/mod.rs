//! Debug utilities and helpers
//!
//! Invariant checks that are fatal in debug builds and only logged in
//! release builds.

/// Debug mode feature flag
pub const DEBUG_MODE: bool = cfg!(debug_assertions);

/// Validate state invariant
///
/// Logs an error when `condition` is false; panics in debug builds.
pub fn validate_invariant(condition: bool, message: &str) {
    if condition {
        return;
    }
    tracing::error!("Invariant violation: {}", message);
    if DEBUG_MODE {
        panic!("Invariant violation: {}", message);
    }
}
