//! Core application functionality
//!
//! This module contains the core application logic, including:
//! - CLI parsing and validation
//! - User settings and their resolution against CLI arguments
//! - Error types shared by every stage
//! - The runner driving generation and packaging

pub mod cli;
pub mod config_file;
pub mod errors;
pub mod platform;
pub mod runner;
pub mod settings;

// Re-export commonly used items
pub use cli::CliArgs;
pub use config_file::ConfigFile;
pub use errors::{ErrorKind, Result, TofuError};
pub use runner::{generate, run_app};
pub use settings::GeneratorSettings;
