//! High-level operations.
//!
//! The by-name facade over the resolver and the mock engine.

pub mod protected;

pub use protected::Protected;
