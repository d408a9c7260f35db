//! Logger initialization.
//!
//! Diagnostics go to stderr through `env_logger` so stdout only ever carries
//! the report.

use console::style;
use log::{Level, LevelFilter};
use std::io::Write;

/// Maps the number of `-v` flags to the crate's log level.
#[must_use]
pub const fn level_for(verbosity: u8) -> LevelFilter {
  match verbosity {
    0 => LevelFilter::Warn,
    1 => LevelFilter::Info,
    2 => LevelFilter::Debug,
    _ => LevelFilter::Trace,
  }
}

/// Initializes the logger.
///
/// `RUST_LOG` is read first; the level derived from `verbosity` then
/// overrides it for this crate. Dependencies stay at `warn`.
pub fn init(verbosity: u8) {
  let level = level_for(verbosity);

  let mut builder = env_logger::Builder::from_default_env();
  builder.filter_level(LevelFilter::Warn);
  builder.filter_module("ippi", level);
  builder.format(|buf, record| {
    let label = match record.level() {
      Level::Error => style("error").red().bold(),
      Level::Warn => style("warning").yellow().bold(),
      Level::Info => style("info").green(),
      Level::Debug => style("debug").blue(),
      Level::Trace => style("trace").dim(),
    };
    writeln!(buf, "{label}: {}", record.args())
  });

  // env_logger can only be initialized once per process
  let _ = builder.try_init();
}
