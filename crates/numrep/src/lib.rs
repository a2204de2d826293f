//! numrep library: configuration, output rendering and command
//! implementations shared by the `numrep` binary and its tests.

pub mod commands;
pub mod config;
pub mod output;

pub use config::{Config, ConfigError};
pub use output::OutputFormat;
