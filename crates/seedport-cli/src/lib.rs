//! Seedport CLI library.
//!
//! Command-line front end for moving seed data out of the app's Room
//! initializer and into the document store: configuration, credential
//! lookup, command execution and output formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod credentials;
pub mod error;
pub mod output;

pub use cli::{Cli, Command};
pub use config::Config;
pub use credentials::ServiceAccount;
pub use error::{CliError, Result};
pub use output::Formatter;
