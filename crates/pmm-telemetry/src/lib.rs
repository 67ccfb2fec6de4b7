//! Structured logging for the binary-outcome market maker.
//!
//! Logs go to stderr so decision output on stdout stays machine-readable.

pub mod error;
pub mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::init_logging;
