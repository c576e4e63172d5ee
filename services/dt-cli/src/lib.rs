//! dt - Disruptive Technologies command-line browser
//!
//! Lists projects and devices, dumps event history, and smooths temperature
//! readings with a Gaussian process. All output is JSON on stdout.

pub mod commands;
pub mod config;
pub mod error;
pub mod forecast;

pub use commands::{execute, Command};
pub use config::{load_config, resolve_credentials, Config};
pub use error::{CliError, Result};
