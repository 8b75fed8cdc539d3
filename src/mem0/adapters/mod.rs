//! Integration helpers for hosting runtimes.

pub mod logging;

pub use logging::init_tracing;
