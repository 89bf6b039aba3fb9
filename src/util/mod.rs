//! Shared utilities

pub mod config;
pub mod diagnostic;

pub use config::MockConfig;
pub use diagnostic::Diagnostic;
