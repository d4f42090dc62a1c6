//! Backend test support utilities
//!
//! Shared helpers for the backend's integration tests: envelope assertions,
//! unique fixture values and unified logging initialization.

pub mod envelope;
pub mod test_logging;
pub mod unique_helpers;
