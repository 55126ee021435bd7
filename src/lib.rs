//! Spotify playlist remixer.
//!
//! Authenticates against the Spotify Web API with the authorization-code
//! flow, reads a playlist and builds a new one in which every track is
//! swapped for a related track (same album or the artist's top tracks),
//! keeping the original order.
//!
//! # Modules
//!
//! - `api` - HTTP handlers of the local callback listener
//! - `cli` - Command-line flows
//! - `config` - Configuration and environment variables
//! - `error` - Error types
//! - `mixer` - Track substitution
//! - `server` - Local HTTP listener for the OAuth redirect
//! - `spotify` - Spotify Web API client
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod mixer;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

pub use error::{AuthError, Error, Res, WriteError};

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Waiting for authorization...");
/// info!("Found {} tracks", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only for fatal errors in the binary; library code returns [`Error`].
///
/// # Example
///
/// ```
/// error!("Failed to load configuration");
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
