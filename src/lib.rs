#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]

use anyhow::Result;
use std::process::ExitCode;

mod app;
mod cli;
pub mod config;
pub mod distance;
pub mod error;
pub mod ip;
pub mod logger;
pub mod pipeline;
pub mod providers;
pub mod results;

pub use config::Config;
pub use distance::{distance, Coordinate, Unit};
pub use error::LookupError;
pub use ip::is_valid_ip;
pub use pipeline::{Investigation, Outcome, Pipeline, Stage};

/// Runs the command-line application.
///
/// This function parses command-line arguments, loads the user configuration,
/// investigates the requested IP address and prints the report.
///
/// Returns a failing exit code when the IP is invalid or nothing could be
/// learned about it.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built, the configuration
/// cannot be saved, or printing the results in JSON format fails.
pub async fn run() -> Result<ExitCode> {
  let mut app = app::App::new()?;
  app.run().await
}
