use crate::config::Config;
use clap::{ArgAction, Parser};
use std::env;

pub const CURRENCY_API_KEY_ENV: &str = "CURRCONV_API_KEY";

#[derive(Parser, Debug, Clone)]
#[command(name = "ippi", author = "jereaa", version)]
#[command(
  about = "Investigate an IP address: country, languages, local times, distance and currency.",
  long_about = "A command-line utility that looks up the country an IP address belongs to, then that country's languages, current local times, distance from a reference point and the exchange rate of its currency against the US dollar."
)]
pub struct Cli {
  /// The IPv4 or IPv6 address to investigate.
  #[arg(required_unless_present = "config_show")]
  pub ip: Option<String>,

  /// Output results in JSON format instead of human-readable text.
  #[arg(long)]
  pub json: bool,

  /// Do not show the progress spinner.
  #[arg(short, long)]
  pub quiet: bool,

  /// Increase log verbosity (-v info, -vv debug, -vvv trace).
  #[arg(short, long, action = ArgAction::Count)]
  pub verbose: u8,

  /// Geolocation service endpoint.
  #[arg(long, value_name = "URL")]
  pub geo_endpoint: Option<String>,

  /// Country information service endpoint.
  #[arg(long, value_name = "URL")]
  pub country_endpoint: Option<String>,

  /// Currency conversion service endpoint.
  #[arg(long, value_name = "URL")]
  pub currency_endpoint: Option<String>,

  /// Milliseconds to wait for a connection to each service.
  #[arg(long, value_name = "MS")]
  pub connect_timeout_ms: Option<u64>,

  /// Currency converter API key.
  /// Overrides the config file and the `CURRCONV_API_KEY` environment variable.
  #[arg(long = "currency-api-key", value_name = "API_KEY")]
  pub currency_api_key_flag: Option<String>,

  /// Persist the effective configuration (including flags above) into the user config file.
  #[arg(long)]
  pub save_config: bool,

  /// Print the current merged configuration and exit.
  #[arg(long)]
  pub config_show: bool,
}

impl Cli {
  /// Applies command-line overrides on top of the stored configuration.
  pub fn apply_overrides(&self, config: &mut Config) {
    if let Some(url) = &self.geo_endpoint {
      config.endpoints.geolocation.clone_from(url);
    }
    if let Some(url) = &self.country_endpoint {
      config.endpoints.country.clone_from(url);
    }
    if let Some(url) = &self.currency_endpoint {
      config.endpoints.currency.clone_from(url);
    }
    if let Some(ms) = self.connect_timeout_ms {
      config.connect_timeout_ms = ms;
    }

    let key = self
      .currency_api_key_flag
      .clone()
      .or_else(|| config.currency_api_key.clone())
      .or_else(|| {
        env::var(CURRENCY_API_KEY_ENV)
          .ok()
          .filter(|key| !key.is_empty())
      });
    config.currency_api_key = key;
  }
}
