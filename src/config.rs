use crate::distance::Coordinate;
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

const APP_NAME: &str = "ippi";
const FILE_NAME: Option<&str> = None;

pub const DEFAULT_GEOLOCATION_ENDPOINT: &str = "https://api.ip2country.info/ip";
pub const DEFAULT_COUNTRY_ENDPOINT: &str = "https://restcountries.com/v2/alpha";
pub const DEFAULT_CURRENCY_ENDPOINT: &str = "https://free.currconv.com/api/v7/convert";
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_REFERENCE: Coordinate = Coordinate::new(-34.0, -64.0);

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Endpoints {
  pub geolocation: String,
  pub country: String,
  pub currency: String,
}

impl Default for Endpoints {
  fn default() -> Self {
    Self {
      geolocation: DEFAULT_GEOLOCATION_ENDPOINT.to_string(),
      country: DEFAULT_COUNTRY_ENDPOINT.to_string(),
      currency: DEFAULT_CURRENCY_ENDPOINT.to_string(),
    }
  }
}

/// Everything an investigation needs besides the IP itself.
///
/// Stored in `~/.config/ippi/default-config.toml` (or the OS equivalent);
/// keys missing from the file take their default.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
  pub endpoints: Endpoints,
  /// How long to wait for a connection. Reads are not bounded.
  pub connect_timeout_ms: u64,
  /// Point distances are measured from
  pub reference: Coordinate,
  /// Name of the reference point shown in the report
  pub reference_name: String,
  pub currency_api_key: Option<String>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      endpoints: Endpoints::default(),
      connect_timeout_ms: DEFAULT_CONNECT_TIMEOUT_MS,
      reference: DEFAULT_REFERENCE,
      reference_name: "Argentina".to_string(),
      currency_api_key: None,
    }
  }
}

impl Config {
  #[must_use]
  pub const fn connect_timeout(&self) -> Duration {
    Duration::from_millis(self.connect_timeout_ms)
  }
}

/// Reads the user config file, falling back to defaults if it is unreadable.
pub fn load() -> Config {
  confy::load(APP_NAME, FILE_NAME).unwrap_or_else(|e| {
    warn!("Could not read config file, using defaults: {e}");
    Config::default()
  })
}

/// Writes `cfg` to the user config file.
///
/// # Errors
///
/// Returns an error if the config directory or file cannot be written.
pub fn store(cfg: &Config) -> anyhow::Result<()> {
  confy::store(APP_NAME, FILE_NAME, cfg).map_err(Into::into)
}

pub fn path() -> Option<PathBuf> {
  confy::get_configuration_file_path(APP_NAME, FILE_NAME).ok()
}
