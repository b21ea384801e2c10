//! Application glue module
//!
//! Configuration, logging, and application-level utilities.

mod config;
pub mod logging;

pub use config::{ColorConfig, Config, ConfigError};
