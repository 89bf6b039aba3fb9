//! Test utilities for protected-mock unit tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::test_support::{init_logging, widget};
//!
//! #[test]
//! fn test_example() {
//!     init_logging();
//!     let mut mock = Mock::new(widget());
//!     // ...
//! }
//! ```

pub mod fixtures;

pub use fixtures::*;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter for tests.
pub const LOG_ENV: &str = "PROTECTED_MOCK_LOG";

/// Route `tracing` output to the test harness.
///
/// Safe to call from every test; only the first call installs a subscriber.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("protected_mock=warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
