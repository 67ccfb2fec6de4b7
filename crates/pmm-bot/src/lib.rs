//! Replay runner for the binary-outcome safe-spread strategy.
//!
//! Wires the collaborators around one strategy cycle:
//! - TOML strategy configuration
//! - JSON order-book snapshot with target prices
//! - Cancel/place decision handed back as JSON

pub mod app;
pub mod config;
pub mod error;
pub mod snapshot;

pub use app::Application;
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use snapshot::CycleInput;
