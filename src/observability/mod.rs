//! Observability subsystem.
//!
//! Structured log events only; every request carries its `x-request-id` in
//! the request span opened by the HTTP layer.

pub mod logging;

pub use logging::init_logging;
