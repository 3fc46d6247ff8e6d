//! Logger setup for the binary and tests.
//!
//! The library itself only emits through the `log` facade.

mod init;

pub use crate::logging::init::{init_logging, LoggingConfig, DEFAULT_FILTER};
